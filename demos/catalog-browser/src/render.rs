use envdeck_core::{PageLabel, RevealSet, mask_secret};
use envdeck_model::{
    AccessKey, Application, EnvValueChange, EnvVariable, Group, ListPage, Permission, RecordId,
    Role,
};
use serde::Serialize;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

/// Tabular display of a record kind.
///
/// The first column is always the record id; `fields` renders the rest.
pub trait Row {
    fn columns() -> &'static [&'static str];
    fn id(&self) -> &RecordId;
    fn fields(&self, reveal: &RevealSet) -> Vec<String>;

    fn cells(&self, reveal: &RevealSet) -> Vec<String> {
        let mut cells = vec![self.id().to_string()];
        cells.extend(self.fields(reveal));
        cells
    }
}

fn ts(t: OffsetDateTime) -> String {
    t.format(&Rfc3339).unwrap_or_else(|_| t.to_string())
}

fn opt(v: Option<&str>) -> String {
    v.unwrap_or("-").to_string()
}

impl Row for Application {
    fn columns() -> &'static [&'static str] {
        &["id", "name", "owner", "created", "updated"]
    }
    fn id(&self) -> &RecordId {
        &self.id
    }
    fn fields(&self, _: &RevealSet) -> Vec<String> {
        vec![
            self.name.clone(),
            opt(self.owner.as_deref()),
            ts(self.created_at),
            ts(self.updated_at),
        ]
    }
}

impl Row for EnvVariable {
    fn columns() -> &'static [&'static str] {
        &["id", "environment", "key", "value", "updated"]
    }
    fn id(&self) -> &RecordId {
        &self.id
    }
    fn fields(&self, reveal: &RevealSet) -> Vec<String> {
        let value = if self.secret {
            reveal.display(&self.id, &self.value)
        } else {
            self.value.clone()
        };
        vec![
            self.environment.clone(),
            self.key.clone(),
            value,
            ts(self.updated_at),
        ]
    }
}

impl Row for AccessKey {
    fn columns() -> &'static [&'static str] {
        &["id", "name", "key", "status", "created", "last used"]
    }
    fn id(&self) -> &RecordId {
        &self.id
    }
    fn fields(&self, reveal: &RevealSet) -> Vec<String> {
        vec![
            self.name.clone(),
            reveal.display(&self.id, &self.key),
            self.status.to_string(),
            ts(self.created_at),
            self.last_used_at.map(ts).unwrap_or_else(|| "never".to_string()),
        ]
    }
}

impl Row for Group {
    fn columns() -> &'static [&'static str] {
        &["id", "name", "members", "description"]
    }
    fn id(&self) -> &RecordId {
        &self.id
    }
    fn fields(&self, _: &RevealSet) -> Vec<String> {
        vec![
            self.name.clone(),
            self.member_count.to_string(),
            opt(self.description.as_deref()),
        ]
    }
}

impl Row for Role {
    fn columns() -> &'static [&'static str] {
        &["id", "name", "permissions", "description"]
    }
    fn id(&self) -> &RecordId {
        &self.id
    }
    fn fields(&self, _: &RevealSet) -> Vec<String> {
        vec![
            self.name.clone(),
            self.permission_count.to_string(),
            opt(self.description.as_deref()),
        ]
    }
}

impl Row for Permission {
    fn columns() -> &'static [&'static str] {
        &["id", "name", "resource", "action"]
    }
    fn id(&self) -> &RecordId {
        &self.id
    }
    fn fields(&self, _: &RevealSet) -> Vec<String> {
        vec![
            self.name.clone(),
            self.resource.to_string(),
            self.action.to_string(),
        ]
    }
}

impl Row for EnvValueChange {
    fn columns() -> &'static [&'static str] {
        &["id", "changed", "by", "environment", "key", "kind", "old", "new"]
    }
    fn id(&self) -> &RecordId {
        &self.id
    }
    fn fields(&self, reveal: &RevealSet) -> Vec<String> {
        let show = |v: Option<&str>| match v {
            None => "-".to_string(),
            Some(v) if self.secret && !reveal.is_revealed(&self.id) => mask_secret(v),
            Some(v) => v.to_string(),
        };
        vec![
            ts(self.changed_at),
            self.changed_by.clone(),
            self.environment.clone(),
            self.key.clone(),
            self.kind.to_string(),
            show(self.old_value.as_deref()),
            show(self.new_value.as_deref()),
        ]
    }
}

/// Pagination buttons as text, current page in angle brackets.
pub fn labels_line(labels: &[PageLabel], current: usize) -> String {
    labels
        .iter()
        .map(|l| match l {
            PageLabel::Page(n) if *n == current => format!("<{n}>"),
            PageLabel::Page(n) => n.to_string(),
            PageLabel::Ellipsis => "...".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn table<T: Row>(page: &ListPage<T>, reveal: &RevealSet) -> String {
    let header: Vec<String> = T::columns().iter().map(|c| c.to_uppercase()).collect();
    let rows: Vec<Vec<String>> = page.items.iter().map(|r| r.cells(reveal)).collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let line = |cells: &[String]| {
        cells
            .iter()
            .zip(&widths)
            .map(|(c, &w)| format!("{c:<w$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = line(&header);
    for row in &rows {
        out.push('\n');
        out.push_str(&line(row));
    }
    out
}

#[derive(Serialize)]
pub struct JsonPage {
    pub columns: &'static [&'static str],
    pub page: ListPage<Vec<String>>,
    pub labels: Vec<PageLabel>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_line_marks_current() {
        let labels = envdeck_core::page_labels(5, 10);
        assert_eq!(labels_line(&labels, 5), "1 ... 4 <5> 6 ... 10");
    }

    #[test]
    fn secret_history_values_are_masked_until_revealed() {
        let change: EnvValueChange = serde_json::from_str(
            r#"{"id": "chg-1", "applicationId": "app-1", "environment": "production",
                "key": "STRIPE_SECRET", "kind": "updated", "oldValue": "sk_old_value",
                "newValue": "sk_new_value", "secret": true, "changedBy": "bob",
                "changedAt": "2025-01-01T10:00:00Z"}"#,
        )
        .unwrap();
        let mut reveal = RevealSet::new();
        let cells = change.cells(&reveal);
        assert_eq!(cells[6], "sk********ue");

        reveal.toggle(&change.id);
        let cells = change.cells(&reveal);
        assert_eq!(cells[7], "sk_new_value");
    }

    #[test]
    fn cells_lead_with_record_id_and_mask_key_material() {
        let key: AccessKey = serde_json::from_str(
            r#"{"id": "key-7", "applicationId": "app-1", "name": "ci", "key": "ak_live_123456",
                "status": "active", "createdAt": "2025-01-01T10:00:00Z"}"#,
        )
        .unwrap();
        let mut reveal = RevealSet::new();
        let cells = key.cells(&reveal);
        assert_eq!(cells.len(), AccessKey::columns().len());
        assert_eq!(cells[0], key.id().as_str());
        assert_eq!(cells[2], "ak**********56");
        assert_eq!(cells[5], "never");

        reveal.reveal(key.id());
        assert_eq!(key.cells(&reveal)[2], "ak_live_123456");
    }

    #[test]
    fn table_aligns_columns() {
        let page = ListPage {
            items: vec![Group {
                id: RecordId::from("grp-1"),
                name: "Platform".to_string(),
                description: None,
                member_count: 12,
                created_at: OffsetDateTime::UNIX_EPOCH,
            }],
            total_items: 1,
            total_pages: 1,
            page: 1,
            range_start: 1,
            range_end: 1,
        };
        let out = table(&page, &RevealSet::new());
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines[0], "ID     NAME      MEMBERS  DESCRIPTION");
        assert_eq!(lines[1], "grp-1  Platform  12       -");
    }
}
