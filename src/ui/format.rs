//! pt-BR formatting of money, dates and status values.

use jiff::Timestamp;
use jiff::tz::TimeZone;

use crate::api::dto::{PaymentStatus, QuoteStatus, ServiceCategory, ServiceStatus};

/// Formats an amount as Brazilian reais, e.g. `R$ 4.500,00`.
pub fn format_brl(value: f64) -> String {
    if !value.is_finite() {
        return "R$ -".to_string();
    }

    let cents = (value.abs() * 100.0).round() as u64;
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!(
        "{}R$ {},{:02}",
        sign,
        group_thousands(cents / 100),
        cents % 100
    )
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}

/// `dd/MM/yyyy` in `tz`, or `-` when unknown.
pub fn format_date(timestamp: Option<Timestamp>, tz: &TimeZone) -> String {
    timestamp
        .map(|ts| ts.to_zoned(tz.clone()).strftime("%d/%m/%Y").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// `dd/MM/yyyy HH:mm` in `tz`, or `-` when unknown.
pub fn format_date_time(timestamp: Option<Timestamp>, tz: &TimeZone) -> String {
    timestamp
        .map(|ts| ts.to_zoned(tz.clone()).strftime("%d/%m/%Y %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

pub fn active_label(is_active: bool) -> &'static str {
    if is_active { "Ativo" } else { "Inativo" }
}

/// Display label of a status value; unknown values show their raw text.
pub trait StatusLabel {
    fn label(&self) -> &str;
}

impl StatusLabel for ServiceStatus {
    fn label(&self) -> &str {
        match self {
            ServiceStatus::Pending => "Pendente",
            ServiceStatus::Accepted => "Aceito",
            ServiceStatus::InProgress => "Em Andamento",
            ServiceStatus::Completed => "Concluído",
            ServiceStatus::Cancelled => "Cancelado",
            ServiceStatus::Other(raw) => raw,
        }
    }
}

impl StatusLabel for QuoteStatus {
    fn label(&self) -> &str {
        match self {
            QuoteStatus::Pending => "Pendente",
            QuoteStatus::Accepted => "Aceito",
            QuoteStatus::Rejected => "Rejeitado",
            QuoteStatus::Expired => "Expirado",
            QuoteStatus::Other(raw) => raw,
        }
    }
}

impl StatusLabel for PaymentStatus {
    fn label(&self) -> &str {
        match self {
            PaymentStatus::Pending => "Pendente",
            PaymentStatus::Completed => "Concluído",
            PaymentStatus::Failed => "Falhou",
            PaymentStatus::Refunded => "Reembolsado",
            PaymentStatus::Other(raw) => raw,
        }
    }
}

impl StatusLabel for ServiceCategory {
    fn label(&self) -> &str {
        match self {
            ServiceCategory::Moveis => "Móveis",
            ServiceCategory::Reparos => "Reparos",
            ServiceCategory::Instalacao => "Instalação",
            ServiceCategory::Portas => "Portas",
            ServiceCategory::Janelas => "Janelas",
            ServiceCategory::Other(raw) => raw,
        }
    }
}

/// Label for a raw category key from the dashboard breakdown.
pub fn category_label(raw: &str) -> String {
    let category = ServiceCategory::from(raw.to_string());
    if category.is_known() {
        return category.label().to_string();
    }
    let spaced = raw.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_brl() {
        assert_eq!(format_brl(4500.0), "R$ 4.500,00");
        assert_eq!(format_brl(450.5), "R$ 450,50");
        assert_eq!(format_brl(0.0), "R$ 0,00");
        assert_eq!(format_brl(1234567.891), "R$ 1.234.567,89");
        assert_eq!(format_brl(-10.0), "-R$ 10,00");
        assert_eq!(format_brl(f64::NAN), "R$ -");
    }

    #[test]
    fn test_format_dates_in_utc() {
        let ts: Timestamp = "2024-03-10T14:05:00Z".parse().unwrap();
        assert_eq!(format_date(Some(ts), &TimeZone::UTC), "10/03/2024");
        assert_eq!(format_date_time(Some(ts), &TimeZone::UTC), "10/03/2024 14:05");
        assert_eq!(format_date(None, &TimeZone::UTC), "-");
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(ServiceStatus::InProgress.label(), "Em Andamento");
        assert_eq!(QuoteStatus::Expired.label(), "Expirado");
        assert_eq!(PaymentStatus::Failed.label(), "Falhou");
        assert_eq!(PaymentStatus::Other("chargeback".to_string()).label(), "chargeback");
        assert_eq!(active_label(false), "Inativo");
    }

    #[test]
    fn test_category_label() {
        assert_eq!(category_label("instalacao"), "Instalação");
        assert_eq!(category_label("ar_condicionado"), "Ar condicionado");
        assert_eq!(category_label(""), "");
    }
}
