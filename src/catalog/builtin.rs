//! The built-in tables. This is the entire knowledge base of the demo:
//! hand-authored keyword lists, intent triggers, response fragments, and
//! canned replies about St. Louis municipal services.

use std::collections::HashMap;

use crate::composer::{ActionResponse, AgentResponse, OptionKind, ResponseOption};

use super::{AccountData, Catalog, Department, Intent};

fn list(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

/// Keyword lists, in canonical department order.
fn keyword_table() -> Vec<(Department, Vec<String>)> {
    vec![
        (
            Department::Water,
            list(&["water", "bill", "billing", "leak", "meter", "sewer"]),
        ),
        (
            Department::Property,
            list(&["property", "tax", "assessment", "deed", "parcel", "zoning"]),
        ),
        (
            Department::Business,
            list(&["business", "license", "permit", "vendor", "llc"]),
        ),
        (
            Department::Utilities,
            list(&["electric", "gas", "power", "outage", "energy", "utility"]),
        ),
        (
            Department::County,
            list(&["county", "court", "records", "marriage", "jury"]),
        ),
        (
            Department::City,
            list(&["city", "street", "pothole", "trash", "recycling", "mayor"]),
        ),
        (
            Department::Fire,
            list(&["fire", "smoke", "hydrant", "burn"]),
        ),
        (
            Department::Police,
            list(&["police", "crime", "theft", "noise", "accident"]),
        ),
        (
            Department::Health,
            list(&["health", "clinic", "inspection", "vaccine", "sanitation"]),
        ),
    ]
}

/// Intent trigger lists, in detection order.
///
/// Triggers are matched by substring containment against whitespace tokens, so
/// multi-word phrases would never fire — keep every trigger a single word.
fn intent_table() -> Vec<(Intent, Vec<String>)> {
    vec![
        (
            Intent::Payment,
            list(&["pay", "payment", "bill", "owe", "charge", "fee"]),
        ),
        (
            Intent::Inquiry,
            list(&["inquiry", "information", "status", "question", "tell"]),
        ),
        (
            Intent::Application,
            list(&["apply", "application", "register", "renew"]),
        ),
        (
            Intent::Dispute,
            list(&["dispute", "contest", "appeal", "incorrect", "overcharged"]),
        ),
        (
            Intent::Coordination,
            list(&["coordinate", "coordination", "multi", "both", "together"]),
        ),
        (
            Intent::Emergency,
            list(&["emergency", "urgent", "immediately", "danger"]),
        ),
    ]
}

/// One synthesized response line per department.
fn phrase_table() -> HashMap<Department, String> {
    let mut phrases = HashMap::new();
    let entries: [(Department, &str); 10] = [
        (
            Department::Water,
            "Water Division: Your account is in good standing. Current balance and usage details are available, and service requests can be scheduled within 2 business days.",
        ),
        (
            Department::Property,
            "Assessor's Office: Property records located. Current assessment, tax status, and parcel details have been retrieved from the county register.",
        ),
        (
            Department::Business,
            "Business Licensing Office: Licensing requirements confirmed. Applications are processed in 5-7 business days once all supporting documents are on file.",
        ),
        (
            Department::Utilities,
            "Utilities Coordination Office: Service providers have been notified. Outage reports and transfer requests are synchronized across Ameren and Spire systems.",
        ),
        (
            Department::County,
            "St. Louis County Records: County records search complete. Certified copies can be issued by mail or picked up at the Clayton office.",
        ),
        (
            Department::City,
            "City Services: Your request has been logged with the Citizens' Service Bureau and assigned a tracking number for follow-up.",
        ),
        (
            Department::Fire,
            "Fire Department: Inspection and permit information retrieved. Non-emergency requests are handled by the Fire Marshal's office.",
        ),
        (
            Department::Police,
            "Metropolitan Police Department: Report filed with the appropriate district. A reference number has been issued for your records.",
        ),
        (
            Department::Health,
            "Department of Health: Records checked. Clinic schedules and inspection results are current as of this week.",
        ),
        (
            Department::Gov,
            "General Government Services: Your request has been routed to the appropriate office for review.",
        ),
    ];
    for (dept, phrase) in entries {
        phrases.insert(dept, phrase.to_string());
    }
    phrases
}

fn option(text: &str, action: &str, kind: OptionKind) -> ResponseOption {
    ResponseOption {
        text: text.to_string(),
        action: action.to_string(),
        kind,
    }
}

/// Canned responses keyed by the literal query string. These bypass the
/// classifier and composer entirely.
fn canned_table() -> HashMap<String, AgentResponse> {
    let mut canned = HashMap::new();

    canned.insert(
        "When is my trash pickup?".to_string(),
        AgentResponse {
            text: "Trash and recycling in the City of St. Louis are collected weekly by the \
                   Refuse Division. Most neighborhoods have alley pickup; curbside routes are \
                   collected on the day posted for your block. Enter your address on the \
                   city's refuse schedule page for your exact day."
                .to_string(),
            sources: vec!["St. Louis City Services".to_string()],
            operations: vec![],
            account_data: None,
            options: Some(vec![
                option("Report a missed pickup", "report_issue", OptionKind::Primary),
                option("Ask something else", "new_query", OptionKind::Secondary),
            ]),
        },
    );

    canned.insert(
        "How do I start a business in St. Louis?".to_string(),
        AgentResponse {
            text: "To start a business in St. Louis you'll need: (1) a registered business \
                   name with the Missouri Secretary of State, (2) a Graduated Business \
                   License from the License Collector's office, and (3) any occupancy or \
                   health permits required for your location. Most applications can be \
                   started online and are processed in 5-7 business days."
                .to_string(),
            sources: vec![
                "St. Louis Business Licensing Office".to_string(),
                "Missouri Secretary of State".to_string(),
            ],
            operations: vec![],
            account_data: None,
            options: Some(vec![
                option("Check license status", "license_status", OptionKind::Primary),
                option("Ask something else", "new_query", OptionKind::Secondary),
            ]),
        },
    );

    canned.insert(
        "What are City Hall hours?".to_string(),
        AgentResponse {
            text: "St. Louis City Hall (1200 Market St) is open Monday through Friday, \
                   8:00 AM to 5:00 PM, excluding city holidays. The Collector of Revenue \
                   and Recorder of Deeds windows close at 4:30 PM."
                .to_string(),
            sources: vec!["St. Louis General Government Services".to_string()],
            operations: vec![],
            account_data: None,
            options: None,
        },
    );

    canned
}

/// Department-scoped action responses for follow-up buttons.
fn action_table(account: &AccountData) -> HashMap<(Department, String), ActionResponse> {
    let mut actions = HashMap::new();

    actions.insert(
        (Department::Water, "pay_now".to_string()),
        ActionResponse {
            text: format!(
                "Your current water and refuse balance is {}. Payment is due by {}. \
                 You can pay online with a checking account at no fee, or by card with a \
                 $2.50 convenience charge.",
                account.balance_due, account.due_date
            ),
            options: vec![
                option("Confirm payment", "confirm_payment", OptionKind::Primary),
                option("Set up autopay", "setup_autopay", OptionKind::Secondary),
            ],
            show_feedback: false,
        },
    );

    actions.insert(
        (Department::Water, "view_bill".to_string()),
        ActionResponse {
            text: format!(
                "Billing summary for account {}: balance {}, due {}. Usage this cycle \
                 was 5 CCF, in line with your 12-month average.",
                account.account_id, account.balance_due, account.due_date
            ),
            options: vec![
                option("Pay now", "pay_now", OptionKind::Primary),
                option("Dispute a charge", "dispute_charge", OptionKind::Secondary),
            ],
            show_feedback: true,
        },
    );

    actions.insert(
        (Department::Property, "assessment_info".to_string()),
        ActionResponse {
            text: "Your 2024 assessment is on file with the Assessor's Office. Appeals \
                   may be filed with the Board of Equalization before the second Monday \
                   in July."
                .to_string(),
            options: vec![
                option("File an appeal", "file_appeal", OptionKind::Primary),
                option("View parcel record", "view_parcel", OptionKind::Secondary),
            ],
            show_feedback: true,
        },
    );

    actions.insert(
        (Department::Business, "license_status".to_string()),
        ActionResponse {
            text: "No pending license applications were found for your account. New \
                   applications can be submitted online through the License Collector's \
                   portal."
                .to_string(),
            options: vec![option("Start an application", "apply_license", OptionKind::Primary)],
            show_feedback: true,
        },
    );

    actions.insert(
        (Department::City, "report_issue".to_string()),
        ActionResponse {
            text: "Your report has been logged with the Citizens' Service Bureau. \
                   A crew will be dispatched and you'll receive a tracking number by email."
                .to_string(),
            options: vec![],
            show_feedback: true,
        },
    );

    actions
}

fn account_fixture() -> AccountData {
    AccountData {
        account_id: "STL-2024-88341".to_string(),
        service_address: "1200 Market St, St. Louis, MO 63103".to_string(),
        balance_due: "$78.45".to_string(),
        due_date: "the 15th of this month".to_string(),
    }
}

pub(super) fn build() -> Catalog {
    let account = account_fixture();
    let canned = canned_table();
    let actions = action_table(&account);
    Catalog {
        keywords: keyword_table(),
        intents: intent_table(),
        phrases: phrase_table(),
        canned,
        actions,
        account,
    }
}
