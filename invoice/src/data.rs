use serde::Deserialize;

/// A labelled value, e.g. `Name: M/S. ABC STORES`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Field {
    pub label: String,
    #[serde(default)]
    pub value: String,
}

impl Field {
    pub fn new(label: &str, value: &str) -> Self {
        Field {
            label: label.to_string(),
            value: value.to_string(),
        }
    }
}

/// One line of the items table. Amounts are preformatted strings and
/// are printed as given.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LineItem {
    pub description: String,
    pub hsn: String,
    pub qty: String,
    pub unit: String,
    pub rate: String,
    pub amount: String,
    pub gst_pct: String,
    pub gst_amount: String,
    pub total: String,
}

/// A row of the totals block. The last line is highlighted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SummaryLine {
    pub label: String,
    pub amount: String,
}

/// Everything printed on the invoice that is not branding.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InvoiceData {
    pub number: String,
    pub date: String,
    pub our_ref: String,
    pub your_ref: String,
    pub bill_to: Vec<Field>,
    pub ship_to: Vec<Field>,
    pub items: Vec<LineItem>,
    pub summary: Vec<SummaryLine>,
    pub amount_in_words: String,
    pub bank: Vec<Field>,
}

impl InvoiceData {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The Paramount Clothing invoice PC-0001.
    pub fn sample() -> Self {
        let address = || {
            vec![
                Field::new("Name:", "M/S. ABC STORES"),
                Field::new("Address:", "#01-04, BLOCK 219"),
                Field::new("Area:", "PARKLANDS, SERANGOON"),
                Field::new("City:", "SINGAPORE"),
                Field::new("PIN:", "315602"),
            ]
        };
        let mut bill_to = address();
        bill_to.push(Field::new("GSTIN:", ""));

        let item = |description: &str, hsn: &str, qty: &str, rate: &str, amount: &str, gst: &str, total: &str| {
            LineItem {
                description: description.to_string(),
                hsn: hsn.to_string(),
                qty: qty.to_string(),
                unit: "MTRS".to_string(),
                rate: rate.to_string(),
                amount: amount.to_string(),
                gst_pct: "7.00".to_string(),
                gst_amount: gst.to_string(),
                total: total.to_string(),
            }
        };
        let summary = |label: &str, amount: &str| SummaryLine {
            label: label.to_string(),
            amount: amount.to_string(),
        };

        InvoiceData {
            number: "PC-0001".to_string(),
            date: "09.04.2025".to_string(),
            our_ref: "PC-0425-PI-01".to_string(),
            your_ref: "PO# 20250409".to_string(),
            bill_to,
            ship_to: address(),
            items: vec![
                item("COTTON SHIRT MATERIAL", "21011190", "65", "54.55", "3545.75", "248.20", "3793.95"),
                item("COTTON PANT MATERIAL", "19019090", "51", "84.75", "4322.25", "302.56", "4624.81"),
                item("LINEN SHIRT MATERIAL", "19019090", "52", "98.25", "5109.00", "357.63", "5466.63"),
                item("LINEN PANT MATERIAL", "09042211", "39", "143.85", "5610.15", "392.71", "6002.86"),
                item("RAYON SHIRT MATERIAL", "13019013", "75", "43.45", "3258.75", "228.11", "3486.86"),
                item("RAYON PANT MATERIAL", "22021010", "59", "58.90", "3475.10", "243.26", "3718.36"),
            ],
            summary: vec![
                summary("Sub Total", "25,321.00"),
                summary("GST @ 7%", "1,772.47"),
                summary("Total", "27,093.47"),
            ],
            amount_in_words: "Singapore Dollars Twenty Seven Thousand Ninety Three And Forty Seven Cents Only"
                .to_string(),
            bank: vec![
                Field::new("Account Name:", "Paramount Clothing"),
                Field::new("Bank Name:", "Indian Bank, Pallavaram"),
                Field::new("A/C No.:", "7678197857"),
                Field::new("SWIFT Code:", "IDIBINBBMEP"),
                Field::new("IFS Code:", "IDIB000P012"),
            ],
        }
    }
}
