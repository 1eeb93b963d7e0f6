//! Canned HTML fragments for the chat window

use std::fmt::Write;

use compliance_agent_config::CompanyConfig;
use compliance_agent_core::{DocumentCategory, LabourCode, ServiceInfo, StateKey, COMPARISON_FEATURES};
use compliance_agent_scraper::render::escape;

pub const EMPTY_PROMPT: &str = "Please type a message. How can I help you?";

const WARNING_OPEN: &str = r#"<div style="padding:15px; background: #fff3cd; border-left: 4px solid #ffc107; border-radius: 4px;">"#;

/// Wording used by the no-data and missing-state prompts of one category
struct Phrasing {
    no_data_title: &'static str,
    subject: &'static str,
    examples: [&'static str; 3],
}

fn phrasing(category: DocumentCategory) -> Phrasing {
    match category {
        DocumentCategory::ShopEstablishment => Phrasing {
            no_data_title: "No Data Found",
            subject: "Shop &amp; Establishment Act data",
            examples: [
                "Shop &amp; Establishment Act of Delhi",
                "Shop and Establishment Act Maharashtra",
                "SEA Act Karnataka",
            ],
        },
        DocumentCategory::HolidayList => Phrasing {
            no_data_title: "No Holiday Data Found",
            subject: "holiday list",
            examples: [
                "Holiday list of Maharashtra",
                "Holidays in Delhi 2024",
                "Public holidays Karnataka",
            ],
        },
        DocumentCategory::WorkingHours => Phrasing {
            no_data_title: "No Working Hours Data Found",
            subject: "working hours information",
            examples: [
                "Working hours of Delhi",
                "Working hours in Maharashtra",
                "Shop working hours Karnataka",
            ],
        },
        DocumentCategory::MinimumWages => Phrasing {
            no_data_title: "No Minimum Wages Data Found",
            subject: "minimum wages information",
            examples: [
                "Minimum wages of Delhi",
                "Minimum wage rate Maharashtra",
                "Minimum wages Karnataka 2024",
            ],
        },
    }
}

/// Warning for a resolved state whose page gave no usable table
pub fn no_data(category: DocumentCategory, state: &StateKey) -> String {
    let phrasing = phrasing(category);
    let mut html = String::from(WARNING_OPEN);
    let _ = write!(
        html,
        r#"<h4 style="color:#856404; margin-top:0;">⚠️ {}</h4><p style="color:#856404; margin-bottom:0;">We couldn't find {} for "<strong>{}</strong>".</p><p style="color:#856404; margin-top:10px; margin-bottom:0;">Please check your spelling or try formatting like:</p><ul style="color:#856404; margin-top:5px;">"#,
        phrasing.no_data_title,
        phrasing.subject,
        escape(state.as_str())
    );
    for example in phrasing.examples {
        let _ = write!(html, "<li>\"{example}\"</li>");
    }
    html.push_str("</ul></div>");
    html
}

/// Prompt for a document request that named no known state
pub fn specify_state(category: DocumentCategory) -> String {
    let example = phrasing(category).examples[0];
    format!(
        r#"{WARNING_OPEN}<h4 style="color:#856404; margin-top:0;">⚠️ Please Specify a State</h4><p style="color:#856404; margin-bottom:0;">Please mention the state name in your query.</p><p style="color:#856404; margin-top:10px; margin-bottom:0;">Example: "{example}"</p></div>"#
    )
}

const CARD_OPEN: &str = r#"<div style="font-family: Arial, sans-serif; background: white; border-radius: 12px; overflow: hidden; box-shadow: 0 4px 15px rgba(0,0,0,0.1);">"#;
const GREEN_BUTTON: &str = "flex:1; color: white; border: none; padding: 15px 20px; border-radius: 8px; cursor: pointer; font-size: 16px; font-weight: 600; display: inline-flex; align-items: center; justify-content: center; gap: 10px;";

/// Detail card for one labour code
pub fn labour_code_card(code: &LabourCode) -> String {
    let mut html = String::from(CARD_OPEN);
    let _ = write!(
        html,
        r#"<div style="background: linear-gradient(135deg, #2e7d32 0%, #1b5e20 100%); color: white; padding: 20px;"><h3 style="margin:0;"><i class="fas fa-file-code"></i> {}</h3></div><div style="padding: 20px;">"#,
        escape(code.title)
    );
    let _ = write!(
        html,
        r#"<div style="background: #e8f5e9; border-left: 4px solid #28a745; padding: 15px; border-radius: 8px; margin-bottom: 20px;"><i class="fas fa-calendar-check" style="color:#28a745; margin-right:8px;"></i><strong style="color:#1b5e20;">Effective Date:</strong> <span style="color:#28a745;">{}</span></div><p style="color:#555; line-height:1.6; margin-bottom:20px;">{}</p>"#,
        escape(code.effective_date),
        escape(code.description)
    );

    html.push_str(r#"<h4 style="color:#1b5e20; margin:20px 0 10px;">📊 Complete Analysis of Labour Code Changes</h4><ul style="list-style:none; padding:0;">"#);
    for feature in COMPARISON_FEATURES {
        let _ = write!(
            html,
            "<li style='margin:5px 0; color:#555;'><i class='fas fa-check-circle' style='color:#28a745; margin-right:8px;'></i>{}</li>",
            escape(feature)
        );
    }
    html.push_str("</ul>");

    let _ = write!(
        html,
        r#"<div style="display: flex; gap: 15px; margin-top: 25px; flex-wrap: wrap;"><button onclick="openLabourCodeDownloadModal('{key}')" style="{GREEN_BUTTON} background: linear-gradient(135deg, #2e7d32 0%, #1b5e20 100%);"><i class="fas fa-file-pdf"></i> Download via Form</button><button onclick="openComparisonDownloadModal()" style="{GREEN_BUTTON} background: linear-gradient(135deg, #4caf50 0%, #2e7d32 100%);"><i class="fas fa-chart-bar"></i> Download Comparison PDF</button></div>"#,
        key = code.key
    );
    if code.has_drive_link() {
        let _ = write!(
            html,
            r#"<div style="display: flex; gap: 15px; margin-top: 15px; flex-wrap: wrap;"><a href="{}" target="_blank" style="{GREEN_BUTTON} background: linear-gradient(135deg, #4285F4 0%, #0F9D58 100%); text-decoration: none;"><i class="fab fa-google-drive"></i> View on Google Drive</a></div>"#,
            escape(code.drive_url)
        );
    }
    let _ = write!(
        html,
        r#"<div style="margin-top: 20px; padding: 15px; background: #f8f9fa; border-radius: 8px; text-align: center;"><p style="margin:0; color:#666;"><i class="fas fa-globe"></i> Source: <a href="{}" target="_blank" style="color:#2e7d32;">slci.in/new-labour-codes/</a></p></div></div></div>"#,
        escape(code.url)
    );
    html
}

/// Overview card listing every labour code
pub fn labour_code_overview(codes: &[LabourCode]) -> String {
    let mut html = String::from(CARD_OPEN);
    html.push_str(r#"<div style="background: linear-gradient(135deg, #2e7d32 0%, #1b5e20 100%); color: white; padding: 20px;"><h3 style="margin:0;"><i class="fas fa-balance-scale" style="margin-right:10px;"></i> New Labour Codes 2025</h3></div><div style="padding: 20px;">"#);
    html.push_str(r#"<div style="background: #fff3cd; border-left: 4px solid #ffc107; padding: 15px; border-radius: 8px; margin-bottom: 20px;"><i class="fas fa-info-circle" style="color:#856404; margin-right:8px;"></i><strong style="color:#856404;">4 New Codes replacing 44+ old labour laws</strong><p style="color:#856404; margin:5px 0 0;">Implemented from 21st November 2025</p></div>"#);

    html.push_str(r#"<h4 style="color:#2e7d32; margin-bottom:15px;">📋 Select a Code to View Details:</h4><div style="margin-bottom: 20px;">"#);
    for code in codes {
        let _ = write!(
            html,
            r#"<div onclick="openLabourCodeModal('{}')" style="background: white; padding: 15px; border-radius: 8px; margin-bottom: 10px; cursor: pointer; border-left: 4px solid #2e7d32; display: flex; align-items: center; justify-content: space-between;"><div style="display: flex; align-items: center; gap: 10px;"><i class="fas fa-file-pdf" style="color:#dc3545; font-size: 20px;"></i><strong style="color:#2e7d32;">{}</strong></div><i class="fas fa-chevron-right" style="color:#2e7d32;"></i></div>"#,
            code.key,
            escape(code.title)
        );
    }
    html.push_str("</div>");

    html.push_str(r#"<h4 style="color:#2e7d32; margin:20px 0 10px;">🔗 Quick Access to PDFs:</h4><div style="margin-bottom: 20px; padding: 15px; background: #f8f9fa; border-radius: 8px;">"#);
    let mut linked = 0;
    for code in codes.iter().filter(|c| c.has_drive_link()) {
        linked += 1;
        let _ = write!(
            html,
            r#"<div style="margin-bottom: 8px;"><a href="{}" target="_blank" style="color: #2e7d32; text-decoration: none; display: flex; align-items: center; gap: 8px; padding: 8px; background: #f5f5f5; border-radius: 5px;"><i class="fab fa-google-drive" style="color: #4285F4;"></i><span><strong>{}</strong> - View on Drive</span></a></div>"#,
            escape(code.drive_url),
            escape(code.title)
        );
    }
    if linked == 0 {
        html.push_str(r#"<p style="color:#666;">Google Drive links will be added soon.</p>"#);
    }
    html.push_str("</div>");

    html.push_str(r#"<div style="display: flex; gap: 15px; margin-top: 20px; flex-wrap: wrap;"><button onclick="openComparisonDownloadModal()" style="flex:1; background: linear-gradient(135deg, #4caf50 0%, #2e7d32 100%); color: white; border: none; padding: 12px 20px; border-radius: 8px; cursor: pointer; font-size: 14px; font-weight: 600;"><i class="fas fa-chart-bar"></i> Download Complete Comparison</button></div>"#);
    html.push_str(r#"<p style="margin-top: 20px; text-align: center; color: #666; font-size: 12px;">Click any code above to view full details. PDFs are available on Google Drive for direct download.</p></div></div>"#);
    html
}

/// One card per service, each with an enquiry button
pub fn service_cards(services: &[ServiceInfo]) -> String {
    let mut html = String::from(
        r#"<div style="font-family: Arial, sans-serif; padding: 15px; background: linear-gradient(135deg, #f5f7fa 0%, #e9ecef 100%); border-radius: 10px; max-height: 500px; overflow-y: auto;"><h4 style="color: #1a237e; margin-bottom: 15px;"><i class="fas fa-briefcase" style="color: #667eea;"></i> Our Services</h4><div style="display: grid; grid-template-columns: 1fr; gap: 15px;">"#,
    );
    for service in services {
        let title = escape(service.title);
        let _ = write!(
            html,
            r#"<div style="background: white; padding: 15px; border-radius: 8px; border-left: 4px solid #667eea;"><h5 style="margin: 0; color: #1a237e; font-size: 16px;">{title}</h5><p style="margin: 5px 0 0; color: #555; font-size: 14px; line-height: 1.5;">{}</p><button onclick="openServiceModal('{title}')" style="background: #667eea; color: white; border: none; padding: 8px 15px; border-radius: 5px; cursor: pointer; font-size: 13px; margin-top: 10px;"><i class="fas fa-envelope"></i> Enquire</button></div>"#,
            escape(service.description)
        );
    }
    html.push_str(r#"</div><p style="margin-top: 15px; color: #666; font-size: 12px; text-align: center;">Click "Enquire" button next to any service to get detailed information</p></div>"#);
    html
}

/// Keyword answer followed by the EPF/ESI related services list
pub fn with_related_services(answer: &str) -> String {
    format!(
        r#"<div style="font-family: Arial, sans-serif;"><p>{answer}</p><div style="margin-top: 15px; background: #f5f7fa; padding: 15px; border-radius: 8px;"><h4 style="color: #1a237e;">Related Services:</h4><ul style="list-style-type: none; padding: 0;"><li style="margin: 5px 0;">✅ Registration of Employees</li><li style="margin: 5px 0;">✅ Generation of Challans</li><li style="margin: 5px 0;">✅ Monthly Compliance Reports</li></ul></div></div>"#
    )
}

/// Last resort reply pointing at the firm's contact details
pub fn contact_fallback(company: &CompanyConfig) -> String {
    format!(
        r#"<div style="padding: 15px; background: #f8f9fa; border-radius: 8px; border-left: 4px solid #0d6efd;"><p style="margin: 0; color: #333;">Thank you for contacting <strong>{}</strong>.</p><p style="margin-top: 8px; color: #555;">For detailed assistance regarding your query, please contact our team.</p><div style="margin-top: 10px; color: #444;">📞 <strong>Phone:</strong> {}<br>📧 <strong>Email:</strong> {}</div></div>"#,
        escape(&company.name),
        escape(&company.phone),
        escape(&company.email)
    )
}
