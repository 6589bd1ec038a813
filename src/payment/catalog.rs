/// Countries and payment methods offered to donors
use serde::Serialize;

/// Country selected by default in the payment form
pub const DEFAULT_COUNTRY: &str = "AO";

/// Quick-pick donation amounts, in whole currency units
pub const SUGGESTED_AMOUNTS: [u64; 4] = [50, 100, 200, 500];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Country {
    pub code: &'static str,
    pub name: &'static str,
    pub currency: &'static str,
    pub symbol: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MethodType {
    Mobile,
    Card,
    Bank,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaymentMethod {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub method_type: MethodType,
    pub countries: &'static [&'static str],
}

pub const COUNTRIES: &[Country] = &[
    Country { code: "AO", name: "Angola", currency: "AOA", symbol: "Kz" },
    Country { code: "BR", name: "Brasil", currency: "BRL", symbol: "R$" },
    Country { code: "PT", name: "Portugal", currency: "EUR", symbol: "€" },
    Country { code: "MZ", name: "Moçambique", currency: "MZN", symbol: "MT" },
    Country { code: "US", name: "Estados Unidos", currency: "USD", symbol: "$" },
];

const CARD_COUNTRIES: &[&str] = &["AO", "BR", "PT", "US", "MZ"];

pub const PAYMENT_METHODS: &[PaymentMethod] = &[
    PaymentMethod {
        id: "unitel",
        name: "UNITEL Money",
        description: "Pagamento via UNITEL Money",
        method_type: MethodType::Mobile,
        countries: &["AO"],
    },
    PaymentMethod {
        id: "visa",
        name: "VISA",
        description: "Cartão de crédito ou débito VISA",
        method_type: MethodType::Card,
        countries: CARD_COUNTRIES,
    },
    PaymentMethod {
        id: "mastercard",
        name: "Mastercard",
        description: "Cartão de crédito ou débito Mastercard",
        method_type: MethodType::Card,
        countries: CARD_COUNTRIES,
    },
    PaymentMethod {
        id: "mpesa",
        name: "M-Pesa",
        description: "Pagamento móvel M-Pesa",
        method_type: MethodType::Mobile,
        countries: &["MZ"],
    },
];

pub fn country(code: &str) -> Option<&'static Country> {
    COUNTRIES.iter().find(|c| c.code.eq_ignore_ascii_case(code))
}

pub fn method(id: &str) -> Option<&'static PaymentMethod> {
    PAYMENT_METHODS.iter().find(|m| m.id == id)
}

/// Methods usable from a country, in catalog order
pub fn methods_for_country(code: &str) -> Vec<&'static PaymentMethod> {
    match country(code) {
        Some(country) => PAYMENT_METHODS
            .iter()
            .filter(|m| m.countries.contains(&country.code))
            .collect(),
        None => Vec::new(),
    }
}

/// pt-BR style: `R$ 1.234,50`
pub fn format_amount(country: &Country, amount_cents: u64) -> String {
    let whole = (amount_cents / 100).to_string();
    let cents = amount_cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    format!("{} {},{:02}", country.symbol, grouped, cents)
}
