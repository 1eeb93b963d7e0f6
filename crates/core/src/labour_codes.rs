//! The four consolidated labour codes notified on 21st November 2025

use crate::{Error, Result, TableMatrix};

/// A new labour code and where to get its notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabourCode {
    /// Path key, e.g. `code_on_wages`
    pub key: &'static str,
    pub title: &'static str,
    pub url: &'static str,
    /// Google Drive viewer link, empty when not yet published
    pub drive_url: &'static str,
    /// Direct download link, empty when not yet published
    pub download_url: &'static str,
    pub description: &'static str,
    pub effective_date: &'static str,
    /// Phrases that select this code in chat
    pub keywords: &'static [&'static str],
}

impl LabourCode {
    pub fn find(key: &str) -> Result<&'static LabourCode> {
        LABOUR_CODES
            .iter()
            .find(|c| c.key == key)
            .ok_or_else(|| Error::UnknownLabourCode(key.to_string()))
    }

    /// First code whose keywords appear in `message`
    pub fn matching(message: &str) -> Option<&'static LabourCode> {
        LABOUR_CODES
            .iter()
            .find(|c| c.keywords.iter().any(|k| message.contains(k)))
    }

    pub fn has_drive_link(&self) -> bool {
        !self.drive_url.is_empty()
    }

    /// Direct download, else the Drive viewer
    pub fn redirect_url(&self) -> Option<&'static str> {
        [self.download_url, self.drive_url]
            .into_iter()
            .find(|u| !u.is_empty())
    }

    /// Download-stats act type, e.g. `labour_code_code_on_wages`
    pub fn stats_act_type(&self) -> String {
        format!("labour_code_{}", self.key)
    }

    pub fn pdf_filename(&self) -> String {
        format!("{}_notification.pdf", self.key)
    }

    /// Tables for the single-code notification PDF
    pub fn detail_tables(&self) -> Vec<TableMatrix> {
        let mut tables = vec![
            rows(&[
                &["Code Name", self.title],
                &["Effective Date", self.effective_date],
                &["Description", self.description],
                &["Source", "slci.in/new-labour-codes/"],
            ]),
            std::iter::once(vec!["Key Features".to_string(), "Status".to_string()])
                .chain(
                    COMPARISON_FEATURES
                        .iter()
                        .map(|f| vec![f.to_string(), "Included".to_string()]),
                )
                .collect(),
        ];
        if self.has_drive_link() {
            tables.push(rows(&[&["Google Drive Link", "Access PDF"], &["URL", self.drive_url]]));
        }
        tables
    }
}

/// Chat phrases that open the labour code section
pub const LABOUR_CODE_TRIGGERS: &[&str] = &[
    "new labour codes",
    "new labor codes",
    "labour codes",
    "labor codes",
    "new labour laws",
    "new labor laws",
    "code on social security",
    "social security code",
    "industrial relations code",
    "code on wages",
    "wages code",
    "occupational safety code",
    "osh code",
    "labour code 2020",
];

pub static LABOUR_CODES: &[LabourCode] = &[
    LabourCode {
        key: "social_security",
        title: "Code on Social Security 2020",
        url: "https://www.slci.in/new-labour-codes/",
        drive_url: "https://drive.google.com/file/d/1OHxyV0mvZ2XzbD8vfTWH1YjzsLn5BwDo/view",
        download_url: "https://drive.google.com/uc?export=download&id=1OHxyV0mvZ2XzbD8vfTWH1YjzsLn5BwDo",
        description: "Official notification regarding the implementation of the Code on Social Security 2020, issued on 21st November 2025. Provides key updates for employers, HR professionals, and employees about social security compliance, benefits, and legal obligations under the latest labour laws in India.",
        effective_date: "21st November 2025",
        keywords: &["social security", "social security code", "code on social security", "social security 2020"],
    },
    LabourCode {
        key: "industrial_relations",
        title: "Industrial Relations Code 2020",
        url: "https://www.slci.in/new-labour-codes/",
        drive_url: "https://drive.google.com/file/d/1DsrojQwuBKbBR0BeO1e926He1b3MFrp9/view",
        download_url: "https://drive.google.com/uc?export=download&id=1DsrojQwuBKbBR0BeO1e926He1b3MFrp9",
        description: "Official notifications regarding the implementation of the Industrial Relations Code 2020, issued on 21st November 2025. Provides key updates for employers, HR professionals, and employees on legal compliance and industrial relations management in India.",
        effective_date: "21st November 2025",
        keywords: &["industrial relations", "industrial relations code", "ir code", "industrial relations 2020"],
    },
    LabourCode {
        key: "code_on_wages",
        title: "Code on Wages 2019",
        url: "https://www.slci.in/new-labour-codes/",
        drive_url: "https://drive.google.com/file/d/1waBwWLNYYfva0TSb-HAQbBkI1AKE3YSA/view",
        download_url: "https://drive.google.com/uc?export=download&id=1waBwWLNYYfva0TSb-HAQbBkI1AKE3YSA",
        description: "Official notification for the implementation of the Code on Wages 2019, issued on 21st November 2025. Provides clear guidance on wage regulations, helping employers, HR teams, and employees understand their rights and compliance requirements under the latest labour laws in India.",
        effective_date: "21st November 2025",
        keywords: &["code on wages", "wages code", "wage code", "wages 2019"],
    },
    LabourCode {
        key: "occupational_safety",
        title: "Occupational Safety, Health & Working Conditions Code 2020",
        url: "https://www.slci.in/new-labour-codes/",
        drive_url: "",
        download_url: "",
        description: "Official notification for the implementation of the Occupational Safety, Health, and Working Conditions Code 2020, issued on 21st November 2025. Helps employers, HR teams, and workers stay informed about workplace safety standards, health regulations, and legal compliance requirements under the new labour code.",
        effective_date: "21st November 2025",
        keywords: &["occupational safety", "safety code", "health and safety", "working conditions", "osh code"],
    },
];

pub const COMPARISON_TITLE: &str = "Complete Analysis of Labour Code Changes";

pub const COMPARISON_FEATURES: &[&str] = &[
    "Comparison of 44+ old laws vs 4 new consolidated codes",
    "Detailed analysis of wage definitions and components",
    "Social security coverage and benefits comparison",
    "Working hours and leave policy changes",
    "Compliance and inspection regime updates",
    "Impact on employers and employees",
    "Implementation guidelines and timelines",
];

/// Old regime vs new codes, header first
pub const OLD_VS_NEW: &[[&str; 3]] = &[
    ["Aspect", "Old System", "New System"],
    ["Number of Laws", "44+ separate acts", "4 consolidated codes"],
    ["Wage Definition", "Varying definitions", "Uniform definition across codes"],
    ["Social Security", "Limited coverage", "Universal social security"],
    ["Working Hours", "State-specific variations", "Standardized hours"],
    ["Compliance", "Multiple registrations", "Single registration portal"],
    ["Inspections", "Physical inspections", "Web-based inspections"],
];

/// Tables for the full comparison PDF: overview, features, old vs new, Drive links
pub fn comparison_tables() -> Vec<TableMatrix> {
    let mut tables = Vec::with_capacity(4);

    let mut overview = rows(&[&["Labour Code", "Old Laws Replaced", "Effective Date"]]);
    overview.extend(LABOUR_CODES.iter().map(|c| {
        vec![
            c.title.to_string(),
            "Multiple old acts".to_string(),
            c.effective_date.to_string(),
        ]
    }));
    tables.push(overview);

    let mut features = rows(&[&["Feature Category", "Details"]]);
    features.extend(COMPARISON_FEATURES.iter().map(|f| match f.split_once(':') {
        Some((category, details)) => vec![category.to_string(), details.to_string()],
        None => vec![f.to_string(), "Comprehensive update".to_string()],
    }));
    tables.push(features);

    tables.push(
        OLD_VS_NEW
            .iter()
            .map(|row| row.iter().map(|c| c.to_string()).collect())
            .collect(),
    );

    let mut drive = rows(&[&["Labour Code", "Google Drive Link"]]);
    drive.extend(
        LABOUR_CODES
            .iter()
            .filter(|c| c.has_drive_link())
            .map(|c| vec![c.title.to_string(), c.drive_url.to_string()]),
    );
    if drive.len() > 1 {
        tables.push(drive);
    }

    tables
}

fn rows(data: &[&[&str]]) -> TableMatrix {
    data.iter()
        .map(|row| row.iter().map(|c| c.to_string()).collect())
        .collect()
}
