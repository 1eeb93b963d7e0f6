//! Static knowledge base for the chat window
//!
//! The keyword table is ordered. Several buckets overlap (`esi` also appears inside
//! other phrases) so callers must scan it in order and stop at the first hit.

/// One keyword bucket with its canned answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordEntry {
    pub key: &'static str,
    pub triggers: &'static [&'static str],
    pub response: &'static str,
}

impl KeywordEntry {
    pub fn matches(&self, message: &str) -> bool {
        self.triggers.iter().any(|t| message.contains(t))
    }

    /// Pricing answers come with the fee enquiry button
    pub fn shows_fee_button(&self) -> bool {
        matches!(self.key, "pricing" | "fees" | "cost")
    }

    /// EPF and ESI answers are followed by the related services list
    pub fn lists_related_services(&self) -> bool {
        matches!(self.key, "epf" | "esi")
    }
}

/// First bucket whose triggers appear in `message`
pub fn lookup(message: &str) -> Option<&'static KeywordEntry> {
    KEYWORD_TABLE.iter().find(|entry| entry.matches(message))
}

const FEE_ANSWER: &str = "Our service fees are customized based on your business size, industry, and compliance requirements. Please click the button below to submit your enquiry, and our team will provide a detailed quotation within 24 hours.";

pub static KEYWORD_TABLE: &[KeywordEntry] = &[
    KeywordEntry {
        key: "what is slci",
        triggers: &["what is slci", "about slci", "tell me about slci", "slci meaning", "who is slci"],
        response: "SLCI (Shakti Legal Compliance India) is a premier legal compliance consultancy firm established to help businesses navigate complex Indian labor laws and regulations.",
    },
    KeywordEntry {
        key: "full form of slci",
        triggers: &["full form", "stands for", "slci full form", "slci expansion"],
        response: "SLCI stands for Shakti Legal Compliance India. 'Shakti' represents strength in Sanskrit.",
    },
    KeywordEntry {
        key: "contact number",
        triggers: &["contact number", "phone number", "call", "helpline", "mobile", "telephone", "whatsapp"],
        response: "📞 Mobile: +91 9999329153 | Mobile :- 8373917131",
    },
    KeywordEntry {
        key: "email",
        triggers: &["email", "mail", "email id", "email address", "write to us"],
        response: "contact@slci.in",
    },
    KeywordEntry {
        key: "address",
        triggers: &["address", "location", "office", "headquarter", "noida", "delhi office", "where are you"],
        response: r#"<div style="background: #f8f9fa; padding: 20px; border-radius: 10px; border-left: 4px solid #667eea;"><h3 style="color: #667eea; margin-top: 0;">📍 Our Office Address</h3><p style="color: #333; font-size: 16px; line-height: 1.6; margin: 15px 0;">83, DSIDC COMPLEX,<br>Okhla I Rd, Pocket C,<br>Okhla Phase I, Okhla Industrial Estate,<br>New Delhi, Delhi 110020</p><div style="text-align: center; margin-top: 20px;"><a href="https://www.google.com/maps/place/Shakti+Legal+Compliance+India+(SLCI)/@28.5253303,77.2827107,18z" target="_blank" style="display: inline-block; background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: white; padding: 12px 30px; text-decoration: none; border-radius: 25px; font-weight: 600;">🗺️ Click here to open in Google Maps</a></div></div>"#,
    },
    KeywordEntry {
        key: "timing",
        triggers: &["timing", "office hours", "working hours", "open time", "close time", "what time", "business hours", "monday to saturday", "9 to 6"],
        response: r#"<div style="background: #f8f9fa; padding: 20px; border-radius: 10px; border-left: 4px solid #667eea;"><h3 style="color: #667eea; margin-top: 0;">🕒 Office Timing</h3><p style="color: #333; font-size: 16px; line-height: 1.8; margin: 15px 0;"><strong>Monday - Saturday:</strong> 9:00 AM to 6:00 PM<br><strong>Sunday:</strong> Closed</p><p style="color: #666; font-size: 14px; margin-top: 15px; font-style: italic;">* We recommend scheduling appointments in advance for personalized consultation.</p></div>"#,
    },
    KeywordEntry {
        key: "why slci",
        triggers: &["why slci", "why choose slci", "why does slci work", "why work with slci", "slci advantage", "slci benefits", "why trust slci", "slci experience", "slci expertise"],
        response: r#"<div style="background: linear-gradient(135deg, #667eea15 0%, #764ba215 100%); padding: 25px; border-radius: 12px; border: 1px solid #667eea30;"><h3 style="color: #667eea; margin-top: 0;">✨ Why Choose SLCI?</h3><p style="color: #333; font-size: 18px; font-weight: 600; margin: 10px 0;">🏆 38+ Years of Experience in the Field of Law</p><p style="color: #555; font-size: 15px; line-height: 1.7; margin: 15px 0;">We help clients achieve their goals by providing <strong>high-quality, ethically sound legal counsel</strong> and <strong>strategic advice</strong> tailored to your business needs.</p><ul style="list-style: none; padding: 0;"><li>✅ Expert Legal Team</li><li>✅ Pan-India Coverage</li><li>✅ 24/7 Support</li><li>✅ Cost-Effective Solutions</li></ul><p style="color: #667eea; font-weight: 500; margin-top: 20px; text-align: center;">🤝 Your Compliance Partner for Growth & Peace of Mind</p></div>"#,
    },
    KeywordEntry {
        key: "minimum wages",
        triggers: &["minimum wage", "wages", "wage rate", "salary", "minimum salary"],
        response: "Minimum wages vary by state. Please specify a state (e.g., 'Minimum wages of Delhi').",
    },
    KeywordEntry {
        key: "epf",
        triggers: &["epf", "provident fund", "pf", "pension", "employee provident fund"],
        response: "EPF is mandatory for establishments with 20+ employees. Employee contribution: 12% of Basic + DA",
    },
    KeywordEntry {
        key: "esi",
        triggers: &["esi", "insurance", "employee state", "medical", "esi scheme"],
        response: "ESI applies to establishments with 10+ employees. Total contribution: 4% of wages",
    },
    KeywordEntry {
        key: "gratuity",
        triggers: &["gratuity", "gratuity amount", "gratuity calculation"],
        response: "Gratuity is payable after 5 years of continuous service. Formula: (Last salary × 15 × Years) / 26",
    },
    KeywordEntry {
        key: "bonus",
        triggers: &["bonus", "annual bonus", "bonus act"],
        response: "Annual bonus of 8.33% to 20% of salary under Payment of Bonus Act",
    },
    KeywordEntry {
        key: "working hours",
        triggers: &["working hours", "work hours", "daily hours", "shift timing"],
        response: "Working hours vary by state. Please specify a state (e.g., 'Working hours of Delhi').",
    },
    KeywordEntry {
        key: "holiday list",
        triggers: &["holiday", "holiday list", "public holiday", "national holiday", "bank holiday", "leaves"],
        response: "Holiday lists vary by state. Please specify a state (e.g., 'Holiday list of Maharashtra').",
    },
    KeywordEntry {
        key: "shop establishment",
        triggers: &["shop and establishment", "shop establishment act", "sea act", "commercial establishment", "shop license"],
        response: "Shop and Establishment Act rules vary by state. Please specify a state (e.g., 'Shop and Establishment Act of Delhi') or ask for the general list.",
    },
    KeywordEntry {
        key: "pricing",
        triggers: &["pricing", "price", "cost", "fee", "fees", "charges", "how much", "quotation", "quote", "package", "plans", "subscription"],
        response: "Our service fees are customized based on your business size, industry, and compliance requirements. Please click the button below to submit your enquiry. Our team will provide a detailed quotation within 24 hours.",
    },
    KeywordEntry {
        key: "fees",
        triggers: &["fees", "fee structure", "service fees", "consulting fees", "charges", "professional fees"],
        response: FEE_ANSWER,
    },
    KeywordEntry {
        key: "cost",
        triggers: &["cost", "cost of services", "how much does it cost", "pricing details", "service cost"],
        response: FEE_ANSWER,
    },
    KeywordEntry {
        key: "website",
        triggers: &["website", "site", "web", "url", "online", "portal"],
        response: "www.slci.in | Blog: www.slci.in/blog | Knowledge Centre: www.slci.in/knowledge-centre",
    },
    KeywordEntry {
        key: "new labour codes",
        triggers: &["new labour codes", "labour codes", "new labor codes", "labor codes", "new labour laws", "new labor laws", "labour code", "labor code", "code on social security", "social security code", "industrial relations code", "code on wages", "occupational safety code"],
        response: "The New Labour Codes are four consolidated codes replacing 44+ old labour laws, implemented from 21st November 2025. They cover: Code on Social Security 2020, Industrial Relations Code 2020, Code on Wages 2019, and Occupational Safety, Health & Working Conditions Code 2020.",
    },
];

/// Phrases that ask for the services list
pub const SERVICE_TRIGGERS: &[&str] = &[
    "services of slci",
    "what does slci do",
    "your services",
    "services you offer",
    "list of services",
    "slci services",
];

/// A service offered by the firm
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceInfo {
    pub title: &'static str,
    pub description: &'static str,
}

pub static SERVICES: &[ServiceInfo] = &[
    ServiceInfo {
        title: "Labour Law Compliances",
        description: "SLCI is a specialist Labour Law Compliance firm with over three decades of experience, helping businesses ensure 100% statutory compliance and risk-free operations through audits, SOP guidance, and periodic compliance support. We provide expert assistance across EPF, ESI, Minimum Wages, Gratuity, POSH, Contract Labour, and other key enactments.",
    },
    ServiceInfo {
        title: "Labour Law Auditing",
        description: "SLCI provides comprehensive Auditing & Assurance services to identify statutory compliance gaps, uncover risk exposures, and prevent costly penalties. Our audits include document checklists, critical analysis, detailed reports, and customized risk-elimination strategies.",
    },
    ServiceInfo {
        title: "Labour Law Consultation",
        description: "SLCI offers expert Labour Law Consultancy, delivering practical and long-term solutions for statutory compliance, due diligence, and risk-free business operations. We support startups, growing businesses, and organizations undergoing mergers or expansions across all industries.",
    },
    ServiceInfo {
        title: "HR Solution",
        description: "SLCI provides comprehensive HR Consulting services, helping businesses design compliant, structured, and cost-effective HR policies and systems. We assist with HR, Leave, POSH, and Work From Home policies, CTC structuring, ICC formation, and NDA agreements.",
    },
    ServiceInfo {
        title: "ESI & EPF",
        description: "SLCI provides end-to-end ESI & EPF Compliance services, ensuring accurate contributions, timely filings, and complete statutory adherence. Our support includes employee registration, UAN generation, challans, KYC approvals, inspections, and automated monthly reports.",
    },
    ServiceInfo {
        title: "Payroll Compliance",
        description: "SLCI provides customised Payroll Compliance solutions, ensuring accurate wage structuring, statutory compliance, and error-free payroll processing. Our technology-driven system offers real-time tracking, digital records, and dedicated payroll support.",
    },
    ServiceInfo {
        title: "Recruitment",
        description: "Identifying and hiring the right talent aligned with your company's skills, culture, and business objectives.",
    },
    ServiceInfo {
        title: "Background Verification",
        description: "Verifying candidate credentials, employment history, and records to ensure authenticity and reduce hiring risks.",
    },
    ServiceInfo {
        title: "Staffing",
        description: "Providing skilled manpower solutions to meet short-term, long-term, or project-based workforce requirements.",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_order() {
        assert_eq!(KEYWORD_TABLE.len(), 20);
        assert_eq!(KEYWORD_TABLE[0].key, "what is slci");
        assert_eq!(KEYWORD_TABLE[19].key, "new labour codes");
        assert_eq!(SERVICES.len(), 9);
    }

    #[test]
    fn test_first_match_wins() {
        // "pf" sits in the epf bucket, which comes before esi
        assert_eq!(lookup("what is epf").map(|e| e.key), Some("epf"));
        assert_eq!(lookup("tell me about esi").map(|e| e.key), Some("esi"));
        // "fees" is also a pricing trigger
        let entry = lookup("what are your fees").unwrap();
        assert_eq!(entry.key, "pricing");
        assert!(entry.shows_fee_button());
    }

    #[test]
    fn test_no_match() {
        assert!(lookup("hello").is_none());
    }
}
