//! Static state vocabulary
//!
//! One ordered table of every state and union territory the agent knows about,
//! with its colloquial variants and the per-category source pages on slci.in.
//! Keys and variants are lowercase. Every key is also its own first variant.

use crate::{DocumentCategory, StateKey};

/// Single shared page listing shop & establishment rules for every state
pub const SHOP_ESTABLISHMENT_URL: &str = "https://www.slci.in/shops-and-establishments-act/";

/// Vocabulary row for one state or union territory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateEntry {
    pub key: &'static str,
    pub variants: &'static [&'static str],
    pub minimum_wages_url: Option<&'static str>,
    pub holiday_url: Option<&'static str>,
    pub working_hours_url: Option<&'static str>,
}

impl StateEntry {
    pub fn state_key(&self) -> StateKey {
        StateKey::new(self.key)
    }

    /// Source page for `category`, if this state publishes one
    pub fn url(&self, category: DocumentCategory) -> Option<&'static str> {
        match category {
            DocumentCategory::MinimumWages => self.minimum_wages_url,
            DocumentCategory::HolidayList => self.holiday_url,
            DocumentCategory::WorkingHours => self.working_hours_url,
            DocumentCategory::ShopEstablishment => {
                (!self.variants.is_empty()).then_some(SHOP_ESTABLISHMENT_URL)
            }
        }
    }
}

macro_rules! state {
    ($key:literal, [$($variant:literal),* $(,)?], $mw:expr, $holiday:expr, $hours:expr) => {
        StateEntry {
            key: $key,
            variants: &[$key, $($variant),*],
            minimum_wages_url: $mw,
            holiday_url: $holiday,
            working_hours_url: $hours,
        }
    };
}

static STATES: &[StateEntry] = &[
    state!(
        "andaman and nicobar",
        ["andaman", "nicobar", "andaman & nicobar"],
        Some("https://www.slci.in/andaman-and-nicobar-islands/"),
        Some("https://www.slci.in/andaman-and-nicobar-islands-holiday-list/"),
        Some("https://www.slci.in/andaman-and-nicobar-islands-working-hours/")
    ),
    state!(
        "andhra pradesh",
        ["andhra", "visakhapatnam", "vizag"],
        Some("https://www.slci.in/minimum-wages/andhra-pradesh/"),
        Some("https://www.slci.in/andhra-pradesh-holiday-list/"),
        Some("https://www.slci.in/andhra-pradesh-working-hours/")
    ),
    state!(
        "arunachal pradesh",
        ["arunachal", "arunchal pradesh"],
        Some("https://www.slci.in/arunachal-pradesh/"),
        Some("https://www.slci.in/arunachal-pradesh-holiday-list/"),
        None
    ),
    state!(
        "assam",
        ["guwahati", "dispur"],
        Some("https://www.slci.in/minimum-wages/assam/"),
        Some("https://www.slci.in/assam-holiday-list/"),
        Some("https://www.slci.in/assam-working-hours/")
    ),
    state!(
        "bihar",
        ["patna", "gaya"],
        Some("https://www.slci.in/minimum-wages/bihar/"),
        Some("https://www.slci.in/bihar-holiday-list/"),
        Some("https://www.slci.in/bihar-working-hours/")
    ),
    state!(
        "chandigarh",
        [],
        Some("https://www.slci.in/minimum-wages/chandigarh/"),
        Some("https://www.slci.in/chandigarh-holiday-list/"),
        Some("https://www.slci.in/chandigarh-working-hours/")
    ),
    state!(
        "chhattisgarh",
        ["raipur", "bilaspur"],
        Some("https://www.slci.in/minimum-wages/chhattisgarh/"),
        Some("https://www.slci.in/chhattisgarh-holiday-list/"),
        Some("https://www.slci.in/chhattisgarh-working-hours/")
    ),
    state!(
        "dadra and nagar haveli",
        ["dadra", "nagar haveli"],
        Some("https://www.slci.in/dadra-and-nagar-haveli/"),
        None,
        Some("https://www.slci.in/dadra-and-nagar-haveli-working-hours/")
    ),
    state!(
        "daman and diu",
        ["daman", "diu"],
        Some("https://www.slci.in/daman-and-diu/"),
        Some("https://www.slci.in/daman-and-diu-holiday-list/"),
        Some("https://www.slci.in/daman-and-diu-working-hours/")
    ),
    state!(
        "delhi",
        ["dilli", "nct of delhi", "new delhi"],
        Some("https://www.slci.in/minimum-wages/delhi/"),
        Some("https://www.slci.in/delhi-holiday-list/"),
        Some("https://www.slci.in/delhi-working-hours/")
    ),
    state!(
        "goa",
        ["panaji", "panjim", "margao"],
        Some("https://www.slci.in/minimum-wages/goa/"),
        Some("https://www.slci.in/goa-holiday-list/"),
        Some("https://www.slci.in/goa-working-hours/")
    ),
    state!(
        "gujarat",
        ["ahmedabad", "surat", "vadodara", "baroda"],
        Some("https://www.slci.in/minimum-wages/gujarat/"),
        Some("https://www.slci.in/gujarat-holiday-list/"),
        Some("https://www.slci.in/gujarat-working-hours/")
    ),
    state!(
        "haryana",
        ["gurgaon", "gurugram", "faridabad", "panipat"],
        Some("https://www.slci.in/minimum-wages/haryana/"),
        Some("https://www.slci.in/haryana-holiday-list/"),
        Some("https://www.slci.in/haryana-working-hours/")
    ),
    state!(
        "himachal pradesh",
        ["hp", "shimla", "manali"],
        Some("https://www.slci.in/minimum-wages/himachal-pradesh/"),
        Some("https://www.slci.in/himachal-pradesh-holiday-list/"),
        Some("https://www.slci.in/himachal-pradesh-working-hours/")
    ),
    state!(
        "jammu and kashmir",
        ["j&k", "srinagar", "jammu"],
        Some("https://www.slci.in/minimum-wages/jammu-and-kashmir/"),
        Some("https://www.slci.in/jammu-and-kashmir-holiday-list/"),
        Some("https://www.slci.in/jammu-and-kashmir-working-hours/")
    ),
    state!(
        "jharkhand",
        ["ranchi", "jamshedpur"],
        Some("https://www.slci.in/minimum-wages/jharkhand/"),
        Some("https://www.slci.in/jharkhand-holiday-list/"),
        Some("https://www.slci.in/jharkhand-working-hours/")
    ),
    state!(
        "karnataka",
        ["bangalore", "bengaluru", "mysore", "mangalore"],
        Some("https://www.slci.in/minimum-wages/karnataka/"),
        Some("https://www.slci.in/karnataka-holiday-list/"),
        Some("https://www.slci.in/karnataka-working-hours/")
    ),
    state!(
        "kerala",
        ["kochi", "trivandrum", "thiruvananthapuram", "calicut"],
        Some("https://www.slci.in/minimum-wages/kerala/"),
        Some("https://www.slci.in/kerala-holiday-list/"),
        Some("https://www.slci.in/kerala-working-hours/")
    ),
    state!(
        "ladakh",
        [],
        Some("https://www.slci.in/minimum-wages/ladakh/"),
        None,
        None
    ),
    state!(
        "madhya pradesh",
        ["mp", "bhopal", "indore", "gwalior"],
        Some("https://www.slci.in/minimum-wages/madhya-pradesh/"),
        Some("https://www.slci.in/madhya-pradesh-holiday-list/"),
        Some("https://www.slci.in/madhya-pradesh-working-hours/")
    ),
    state!(
        "maharashtra",
        ["mumbai", "pune", "nagpur", "thane"],
        Some("https://www.slci.in/minimum-wages/maharashtra/"),
        Some("https://www.slci.in/maharashtra-holiday-list/"),
        Some("https://www.slci.in/maharashtra-working-hours/")
    ),
    state!(
        "manipur",
        ["imphal"],
        Some("https://www.slci.in/minimum-wages/manipur/"),
        Some("https://www.slci.in/manipur-holiday-list/"),
        Some("https://www.slci.in/manipur-working-hours/")
    ),
    state!(
        "meghalaya",
        ["shillong"],
        Some("https://www.slci.in/minimum-wages/meghalaya/"),
        Some("https://www.slci.in/meghalaya-holiday-list/"),
        Some("https://www.slci.in/meghalaya-working-hours/")
    ),
    state!(
        "mizoram",
        ["aizawl"],
        Some("https://www.slci.in/minimum-wages/mizoram/"),
        Some("https://www.slci.in/mizoram-holiday-list/"),
        None
    ),
    state!(
        "nagaland",
        ["kohima", "dimapur"],
        Some("https://www.slci.in/minimum-wages/nagaland/"),
        Some("https://www.slci.in/nagaland-holiday-list/"),
        Some("https://www.slci.in/nagaland-working-hours/")
    ),
    state!(
        "odisha",
        ["orissa", "bhubaneswar", "cuttack"],
        Some("https://www.slci.in/minimum-wages/odisha/"),
        Some("https://www.slci.in/odisha-holiday-list/"),
        Some("https://www.slci.in/odisha-working-hours/")
    ),
    state!(
        "puducherry",
        ["pondicherry"],
        Some("https://www.slci.in/minimum-wages/puducherry/"),
        Some("https://www.slci.in/puducherry-holiday-list/"),
        Some("https://www.slci.in/puducherry-working-hours/")
    ),
    state!(
        "punjab",
        [],
        Some("https://www.slci.in/minimum-wages/punjab/"),
        Some("https://www.slci.in/punjab-holiday-list/"),
        Some("https://www.slci.in/punjab-working-hours/")
    ),
    state!(
        "rajasthan",
        ["jaipur", "jodhpur", "udaipur", "kota"],
        Some("https://www.slci.in/minimum-wages/rajasthan/"),
        Some("https://www.slci.in/rajasthan-holiday-list/"),
        Some("https://www.slci.in/rajasthan-working-hours/")
    ),
    state!(
        "sikkim",
        ["gangtok"],
        Some("https://www.slci.in/minimum-wages/sikkim/"),
        Some("https://www.slci.in/sikkim-holiday-list/"),
        Some("https://www.slci.in/sikkim-working-hours/")
    ),
    state!(
        "tamil nadu",
        ["tamilnadu", "chennai", "madras", "coimbatore"],
        Some("https://www.slci.in/minimum-wages/tamil-nadu/"),
        Some("https://www.slci.in/tamil-nadu-holiday-list/"),
        Some("https://www.slci.in/tamil-nadu-working-hours/")
    ),
    state!(
        "telangana",
        ["hyderabad", "secunderabad"],
        Some("https://www.slci.in/minimum-wages/telangana/"),
        Some("https://www.slci.in/telangana-holiday-list/"),
        Some("https://www.slci.in/telangana-working-hours/")
    ),
    state!(
        "tripura",
        ["agartala"],
        Some("https://www.slci.in/minimum-wages/tripura/"),
        Some("https://www.slci.in/tripura-holiday-list/"),
        Some("https://www.slci.in/tripura-working-hours/")
    ),
    state!(
        "uttar pradesh",
        ["up", "lucknow", "kanpur", "agra", "varanasi"],
        Some("https://www.slci.in/minimum-wages/uttar-pradesh/"),
        Some("https://www.slci.in/uttar-pradesh-holiday-list/"),
        Some("https://www.slci.in/uttar-pradesh-working-hours/")
    ),
    state!(
        "uttarakhand",
        ["dehradun", "haridwar", "nainital"],
        Some("https://www.slci.in/minimum-wages/uttarakhand/"),
        Some("https://www.slci.in/uttarakhand-holiday-list/"),
        Some("https://www.slci.in/uttarakhand-working-hours/")
    ),
    state!(
        "west bengal",
        ["bengal", "kolkata", "calcutta", "howrah"],
        Some("https://www.slci.in/minimum-wages/west-bengal/"),
        Some("https://www.slci.in/west-bengal-holiday-list/"),
        Some("https://www.slci.in/west-bengal-working-hours/")
    ),
];

/// Read-only view over a state table
#[derive(Debug, Clone, Copy)]
pub struct Vocabulary {
    entries: &'static [StateEntry],
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Vocabulary {
    /// The table served by slci.in
    pub fn builtin() -> Self {
        Self { entries: STATES }
    }

    pub fn from_entries(entries: &'static [StateEntry]) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &'static [StateEntry] {
        self.entries
    }

    pub fn get(&self, key: &str) -> Option<&'static StateEntry> {
        let key = key.trim().to_lowercase();
        self.entries.iter().find(|e| e.key == key)
    }

    /// Entries that publish a page for `category`, in table order
    pub fn candidates(
        &self,
        category: DocumentCategory,
    ) -> impl Iterator<Item = &'static StateEntry> {
        self.entries
            .iter()
            .filter(move |e| e.url(category).is_some())
    }

    pub fn source_url(&self, category: DocumentCategory, key: &StateKey) -> Option<&'static str> {
        self.get(key.as_str()).and_then(|e| e.url(category))
    }

    /// Sorted keys available for `category`
    pub fn keys(&self, category: DocumentCategory) -> Vec<StateKey> {
        let mut keys: Vec<StateKey> = self.candidates(category).map(|e| e.state_key()).collect();
        keys.sort();
        keys
    }

    /// Variants registered for `key`, the key itself included
    pub fn variants(&self, key: &StateKey) -> &'static [&'static str] {
        self.get(key.as_str()).map(|e| e.variants).unwrap_or(&[])
    }
}
