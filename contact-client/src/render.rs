use std::fmt;

use contact_shared::models::Contact;

pub const EMPTY_PLACEHOLDER: &str = "No contacts found.";

const HEADERS: [&str; 4] = ["Name", "Email", "Phone", "Id"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl From<&Contact> for ContactRow {
    fn from(contact: &Contact) -> Self {
        Self {
            id: contact.id.clone(),
            name: contact.name.clone(),
            email: contact.email.clone(),
            phone: contact.phone.clone(),
        }
    }
}

impl ContactRow {
    fn cells(&self) -> [&str; 4] {
        [&self.name, &self.email, &self.phone, &self.id]
    }
}

/// The contact list as displayed: one row per contact in server order, or
/// a single placeholder when there are none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactTable {
    Rows(Vec<ContactRow>),
    Empty,
}

impl ContactTable {
    pub fn from_contacts(contacts: &[Contact]) -> Self {
        if contacts.is_empty() {
            ContactTable::Empty
        } else {
            ContactTable::Rows(contacts.iter().map(ContactRow::from).collect())
        }
    }

    pub fn rows(&self) -> &[ContactRow] {
        match self {
            ContactTable::Rows(rows) => rows,
            ContactTable::Empty => &[],
        }
    }
}

impl fmt::Display for ContactTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = match self {
            ContactTable::Empty => return writeln!(f, "{}", EMPTY_PLACEHOLDER),
            ContactTable::Rows(rows) => rows,
        };

        let mut widths = HEADERS.map(str::len);
        for row in rows {
            for (width, cell) in widths.iter_mut().zip(row.cells()) {
                *width = (*width).max(cell.chars().count());
            }
        }

        write_line(f, HEADERS, &widths)?;
        for row in rows {
            write_line(f, row.cells(), &widths)?;
        }
        Ok(())
    }
}

fn write_line(f: &mut fmt::Formatter<'_>, cells: [&str; 4], widths: &[usize; 4]) -> fmt::Result {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect::<Vec<_>>()
        .join("  ");
    writeln!(f, "{}", line.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contact_shared::models::{now, ContactDraft};

    fn contact(id: &str, name: &str) -> Contact {
        ContactDraft::new(name, "a@x.com", "555-1111")
            .validate()
            .unwrap()
            .into_contact(id.to_string(), now())
    }

    #[test]
    fn test_empty_list_renders_placeholder() {
        let table = ContactTable::from_contacts(&[]);
        assert_eq!(table, ContactTable::Empty);
        assert!(table.rows().is_empty());
        assert_eq!(table.to_string(), "No contacts found.\n");
    }

    #[test]
    fn test_rows_keep_server_order() {
        let table = ContactTable::from_contacts(&[contact("2", "Bob"), contact("1", "Alice")]);
        let names: Vec<_> = table.rows().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Bob", "Alice"]);

        let rendered = table.to_string();
        let lines: Vec<_> = rendered.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Name"));
        assert!(lines[1].starts_with("Bob "));
        assert!(lines[2].starts_with("Alice"));
        assert!(!rendered.contains(EMPTY_PLACEHOLDER));
    }
}
