//! Plain-text tables for the list views.

use jiff::tz::TimeZone;

use crate::api::dto::party::label_or;
use crate::api::dto::{Pagination, Quote, Service, Transaction, User};
use crate::list::{FetchState, ListController, ListResource};
use crate::ui::format::{
    StatusLabel, active_label, format_brl, format_date, format_date_time,
};

pub const LOADING_MESSAGE: &str = "Carregando...";

/// Cells of one record, in the order of its view's columns.
pub trait TableRow {
    fn cells(&self, tz: &TimeZone) -> Vec<String>;
}

impl TableRow for User {
    fn cells(&self, tz: &TimeZone) -> Vec<String> {
        vec![
            self.name.clone(),
            self.email.clone(),
            self.phone.clone().unwrap_or_else(|| "-".to_string()),
            active_label(self.is_active).to_string(),
            format_date(self.created_at, tz),
        ]
    }
}

impl TableRow for Service {
    fn cells(&self, tz: &TimeZone) -> Vec<String> {
        vec![
            self.title.clone(),
            self.category.label().to_string(),
            label_or(self.client_id.as_ref(), "N/A").to_string(),
            label_or(self.professional_id.as_ref(), "-").to_string(),
            self.status.label().to_string(),
            format_date(self.created_at, tz),
        ]
    }
}

impl TableRow for Quote {
    fn cells(&self, tz: &TimeZone) -> Vec<String> {
        vec![
            self.title.clone().unwrap_or_else(|| "-".to_string()),
            label_or(self.service_id.as_ref(), "Serviço Removido").to_string(),
            label_or(self.client_id.as_ref(), "N/A").to_string(),
            label_or(self.professional_id.as_ref(), "-").to_string(),
            format_brl(self.total_price),
            self.status.label().to_string(),
            format_date(self.created_at, tz),
        ]
    }
}

impl TableRow for Transaction {
    fn cells(&self, tz: &TimeZone) -> Vec<String> {
        vec![
            format!("#{}", self.short_id()),
            label_or(self.client_id.as_ref(), "N/A").to_string(),
            label_or(self.professional_id.as_ref(), "-").to_string(),
            format_brl(self.amount),
            format!("+ {}", format_brl(self.platform_fee)),
            self.status.label().to_string(),
            format_date_time(self.created_at, tz),
        ]
    }
}

/// Column-aligned text table
#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<S: AsRef<str>>(headers: &[S]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.as_ref().to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                let len = cell.chars().count();
                match widths.get_mut(i) {
                    Some(w) => *w = (*w).max(len),
                    None => widths.push(len),
                }
            }
        }
        widths
    }

    pub fn render(&self) -> String {
        let widths = self.widths();
        let mut out = String::new();

        out.push_str(&render_line(&self.headers, &widths));
        out.push('\n');
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        out.push_str(&render_line(&rule, &widths));
        out.push('\n');
        for row in &self.rows {
            out.push_str(&render_line(row, &widths));
            out.push('\n');
        }
        out
    }
}

fn render_line(cells: &[String], widths: &[usize]) -> String {
    let padded: Vec<String> = widths
        .iter()
        .enumerate()
        .map(|(i, width)| {
            let cell = cells.get(i).map(String::as_str).unwrap_or("");
            let pad = width.saturating_sub(cell.chars().count());
            format!("{}{}", cell, " ".repeat(pad))
        })
        .collect();
    padded.join("  ").trim_end().to_string()
}

/// `Página X de Y` with the enabled navigation controls; `None` for a
/// single page.
pub fn pagination_footer(pagination: &Pagination) -> Option<String> {
    if pagination.pages <= 1 {
        return None;
    }
    let mut footer = format!("Página {} de {}", pagination.page, pagination.pages);
    if pagination.has_prev() {
        footer.push_str("  [Anterior]");
    }
    if pagination.has_next() {
        footer.push_str("  [Próxima]");
    }
    Some(footer)
}

/// Renders the controller's current state as the list view would show it.
pub fn render_list<R>(controller: &ListController<R>, tz: &TimeZone) -> String
where
    R: ListResource,
    R::Item: TableRow,
{
    match controller.state() {
        FetchState::Idle => String::new(),
        FetchState::Loading => format!("{}\n", LOADING_MESSAGE),
        FetchState::Error { .. } => render_empty::<R>(),
        FetchState::Success { items, pagination } if items.is_empty() => {
            let mut out = render_empty::<R>();
            if let Some(footer) = pagination_footer(pagination) {
                out.push_str(&footer);
                out.push('\n');
            }
            out
        }
        FetchState::Success { items, pagination } => {
            let mut table = Table::new(R::COLUMNS);
            for item in items {
                table.push_row(item.cells(tz));
            }
            let mut out = table.render();
            if let Some(footer) = pagination_footer(pagination) {
                out.push('\n');
                out.push_str(&footer);
                out.push('\n');
            }
            out
        }
    }
}

fn render_empty<R: ListResource>() -> String {
    let mut out = Table::new(R::COLUMNS).render();
    out.push_str(R::EMPTY_MESSAGE);
    out.push('\n');
    out
}
