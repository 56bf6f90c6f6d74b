use super::transaction::TransactionKind;

pub const INCOME_CATEGORIES: [&str; 4] = ["Salário", "Freelance", "Investimentos", "Outros"];

pub const EXPENSE_CATEGORIES: [&str; 7] = [
    "Alimentação",
    "Transporte",
    "Moradia",
    "Saúde",
    "Educação",
    "Lazer",
    "Outros",
];

/// Categories offered by the entry form for the given kind.
pub fn categories_for(kind: TransactionKind) -> &'static [&'static str] {
    match kind {
        TransactionKind::Income => &INCOME_CATEGORIES,
        TransactionKind::Expense => &EXPENSE_CATEGORIES,
    }
}

/// Finds the catalog spelling of `input`, ignoring case and surrounding blanks.
pub fn resolve_category(kind: TransactionKind, input: &str) -> Option<&'static str> {
    let needle = input.trim().to_lowercase();
    categories_for(kind)
        .iter()
        .copied()
        .find(|name| name.to_lowercase() == needle)
}
