//! Typed views over scanned documents.
//!
//! Field names follow the stored documents. Decoding never fails: missing or
//! mistyped fields become `None` and the feed falls back to placeholder text.

use crate::store::{Document, FieldValue};

/// Role marker identifying drivers among employees.
pub const DRIVER_ROLE: &str = "motorista";

/// Creation time fields, primary first.
const CREATED_FIELDS: [&str; 2] = ["dataCriacao", "dataCadastro"];

/// Route destination fields, primary first.
const DESTINATION_FIELDS: [&str; 3] = ["destino", "cidadeDestino", "endereco"];

fn text(doc: &Document, name: &str) -> Option<String> {
    doc.text(name).map(|s| s.trim().to_string())
}

fn first_text(doc: &Document, names: &[&str]) -> Option<String> {
    names.iter().find_map(|name| text(doc, name))
}

fn created_at(doc: &Document) -> Option<FieldValue> {
    doc.first_of(&CREATED_FIELDS).cloned()
}

/// An employee. Drivers are employees with the driver role.
#[derive(Debug, Clone, PartialEq)]
pub struct Employee {
    /// Document key.
    pub key: String,
    /// Display name.
    pub name: Option<String>,
    /// Role (`funcao`).
    pub role: Option<String>,
    /// Raw work status.
    pub status: Option<String>,
    /// Raw creation time.
    pub created_at: Option<FieldValue>,
}

impl Employee {
    /// Returns true if the employee holds the driver role.
    #[must_use]
    pub fn is_driver(&self) -> bool {
        self.role
            .as_deref()
            .is_some_and(|role| role.eq_ignore_ascii_case(DRIVER_ROLE))
    }
}

impl From<&Document> for Employee {
    fn from(doc: &Document) -> Self {
        Self {
            key: doc.key.clone(),
            name: text(doc, "nome"),
            role: text(doc, "funcao"),
            status: text(doc, "status"),
            created_at: created_at(doc),
        }
    }
}

/// A delivery route.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Document key.
    pub key: String,
    /// Key of the assigned driver in the employee collection.
    pub driver_id: Option<String>,
    /// Destination, resolved through the fallback fields.
    pub destination: Option<String>,
    /// Raw creation time.
    pub created_at: Option<FieldValue>,
}

impl From<&Document> for Route {
    fn from(doc: &Document) -> Self {
        Self {
            key: doc.key.clone(),
            driver_id: text(doc, "motoristaId"),
            destination: first_text(doc, &DESTINATION_FIELDS),
            created_at: created_at(doc),
        }
    }
}

/// Decision state of a time-off request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeOffStatus {
    /// Approved.
    Approved,
    /// Rejected.
    Rejected,
    /// Anything else, including missing.
    Pending,
}

impl TimeOffStatus {
    /// Parses a stored status token.
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_lowercase()).as_deref() {
            Some("aprovado" | "aprovada") => Self::Approved,
            Some("rejeitado" | "rejeitada") => Self::Rejected,
            _ => Self::Pending,
        }
    }
}

/// A time-off request.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeOffRequest {
    /// Document key.
    pub key: String,
    /// Key of the requesting employee.
    pub employee_id: Option<String>,
    /// Decision state.
    pub status: TimeOffStatus,
    /// Raw first day off.
    pub start_date: Option<FieldValue>,
    /// Raw creation time.
    pub created_at: Option<FieldValue>,
}

impl From<&Document> for TimeOffRequest {
    fn from(doc: &Document) -> Self {
        Self {
            key: doc.key.clone(),
            employee_id: text(doc, "funcionarioId"),
            status: TimeOffStatus::parse(doc.text("status")),
            start_date: doc.get("dataInicio").cloned(),
            created_at: created_at(doc),
        }
    }
}

/// A fleet vehicle.
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    /// Document key.
    pub key: String,
    /// License plate.
    pub plate: Option<String>,
    /// Model.
    pub model: Option<String>,
    /// Raw operating status.
    pub status: Option<String>,
    /// Raw creation time.
    pub created_at: Option<FieldValue>,
}

impl From<&Document> for Vehicle {
    fn from(doc: &Document) -> Self {
        Self {
            key: doc.key.clone(),
            plate: text(doc, "placa"),
            model: text(doc, "modelo"),
            status: text(doc, "status"),
            created_at: created_at(doc),
        }
    }
}

/// A served city.
#[derive(Debug, Clone, PartialEq)]
pub struct City {
    /// Document key.
    pub key: String,
    /// City name.
    pub name: Option<String>,
    /// State code.
    pub state: Option<String>,
    /// Raw creation time.
    pub created_at: Option<FieldValue>,
}

impl From<&Document> for City {
    fn from(doc: &Document) -> Self {
        Self {
            key: doc.key.clone(),
            name: text(doc, "nome"),
            state: text(doc, "estado"),
            created_at: created_at(doc),
        }
    }
}

/// A seller.
#[derive(Debug, Clone, PartialEq)]
pub struct Seller {
    /// Document key.
    pub key: String,
    /// Seller name.
    pub name: Option<String>,
    /// Sales region.
    pub region: Option<String>,
    /// Raw creation time.
    pub created_at: Option<FieldValue>,
}

impl From<&Document> for Seller {
    fn from(doc: &Document) -> Self {
        Self {
            key: doc.key.clone(),
            name: text(doc, "nome"),
            region: text(doc, "regiao"),
            created_at: created_at(doc),
        }
    }
}

/// Decodes every document of a scan.
pub fn decode_all<'a, T>(docs: &'a [Document]) -> Vec<T>
where
    T: From<&'a Document>,
{
    docs.iter().map(T::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("motorista", true)]
    #[case("Motorista", true)]
    #[case("vendedor", false)]
    fn test_driver_role(#[case] role: &str, #[case] expected: bool) {
        let employee = Employee::from(&Document::new("e1").with("funcao", role));
        assert_eq!(employee.is_driver(), expected);
    }

    #[test]
    fn test_employee_without_role_is_not_driver() {
        let employee = Employee::from(&Document::new("e1").with("nome", "Ana"));
        assert!(!employee.is_driver());
    }

    #[test]
    fn test_route_destination_fallback_chain() {
        let primary = Route::from(
            &Document::new("r1")
                .with("destino", "Porto")
                .with("cidadeDestino", "Braga"),
        );
        assert_eq!(primary.destination.as_deref(), Some("Porto"));

        let second = Route::from(
            &Document::new("r2")
                .with("destino", "")
                .with("cidadeDestino", "Braga"),
        );
        assert_eq!(second.destination.as_deref(), Some("Braga"));

        let third = Route::from(&Document::new("r3").with("endereco", "Rua A, 10"));
        assert_eq!(third.destination.as_deref(), Some("Rua A, 10"));

        let none = Route::from(&Document::new("r4"));
        assert!(none.destination.is_none());
    }

    #[test]
    fn test_created_at_prefers_primary_field() {
        let doc = Document::new("c1")
            .with("dataCriacao", 10_i64)
            .with("dataCadastro", 20_i64);
        assert_eq!(City::from(&doc).created_at, Some(FieldValue::Integer(10)));

        let doc = Document::new("c2").with("dataCadastro", 20_i64);
        assert_eq!(City::from(&doc).created_at, Some(FieldValue::Integer(20)));
    }

    #[rstest]
    #[case(Some("aprovado"), TimeOffStatus::Approved)]
    #[case(Some("Rejeitado"), TimeOffStatus::Rejected)]
    #[case(Some("pendente"), TimeOffStatus::Pending)]
    #[case(Some("???"), TimeOffStatus::Pending)]
    #[case(None, TimeOffStatus::Pending)]
    fn test_time_off_status(#[case] raw: Option<&str>, #[case] expected: TimeOffStatus) {
        assert_eq!(TimeOffStatus::parse(raw), expected);
    }
}
