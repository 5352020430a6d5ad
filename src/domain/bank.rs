use std::fmt;

/// The payment rail's institution identifier for a receiving bank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankCode(&'static str);

impl BankCode {
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for BankCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

const BANK_CODES: &[(&str, &str)] = &[
    ("gtb", "058"),
    ("gtbank", "058"),
    ("access", "044"),
    ("zenith", "057"),
    ("uba", "033"),
    ("opay", "999992"),
    ("kuda", "50211"),
    ("wema", "035"),
    ("first", "011"),
    ("sterling", "232"),
    ("fcmb", "214"),
    ("palmpay", "999991"),
    ("moniepoint", "50515"),
];

/// Normalises a free-text bank name: lower-cased with all whitespace removed.
fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Resolves a free-text bank name to its canonical code.
///
/// Matching ignores case and whitespace. Unknown names yield `None`; there is
/// no fallback code.
pub fn lookup(name: &str) -> Option<BankCode> {
    let key = normalize(name);
    BANK_CODES
        .iter()
        .find(|(alias, _)| *alias == key)
        .map(|(_, code)| BankCode(code))
}
