//! Status classification for the breakdown charts.

use super::entity::{Employee, Vehicle, decode_all};
use super::error::DashboardError;
use super::types::{ColorTag, StatusBreakdown};
use crate::store::{Collection, DocumentStore};

/// A named status bucket.
#[derive(Debug, Clone, Copy)]
pub struct Bucket {
    /// Display name.
    pub name: &'static str,
    /// Chart color.
    pub color: ColorTag,
    /// Raw status tokens counted in this bucket.
    pub tokens: &'static [&'static str],
}

/// An ordered set of buckets with a default for unknown statuses.
///
/// Only [`PERSON_STATUS`] and [`VEHICLE_STATUS`] exist; the default index
/// always points into `buckets`.
#[derive(Debug, Clone, Copy)]
pub struct StatusFamily {
    buckets: &'static [Bucket],
    default_bucket: usize,
}

/// Work status of people (drivers, employees).
pub const PERSON_STATUS: StatusFamily = StatusFamily {
    buckets: &[
        Bucket {
            name: "Trabalhando",
            color: ColorTag::Green,
            tokens: &["trabalhando"],
        },
        Bucket {
            name: "Disponível",
            color: ColorTag::Blue,
            tokens: &["disponivel"],
        },
        Bucket {
            name: "Folga",
            color: ColorTag::Orange,
            tokens: &["folga"],
        },
        Bucket {
            name: "Férias",
            color: ColorTag::Purple,
            tokens: &["ferias"],
        },
    ],
    default_bucket: 1,
};

/// Operating status of vehicles.
pub const VEHICLE_STATUS: StatusFamily = StatusFamily {
    buckets: &[
        Bucket {
            name: "Em Operação",
            color: ColorTag::Green,
            tokens: &["em_operacao", "em_uso"],
        },
        Bucket {
            name: "Disponível",
            color: ColorTag::Blue,
            tokens: &["disponivel"],
        },
        Bucket {
            name: "Manutenção",
            color: ColorTag::Orange,
            tokens: &["manutencao"],
        },
        Bucket {
            name: "Inativo",
            color: ColorTag::Red,
            tokens: &["inativo", "parado"],
        },
    ],
    default_bucket: 1,
};

impl StatusFamily {
    /// Buckets in display order.
    #[must_use]
    pub const fn buckets(&self) -> &'static [Bucket] {
        self.buckets
    }

    /// Bucket receiving missing or unknown statuses.
    #[must_use]
    pub const fn default_bucket(&self) -> &'static Bucket {
        let buckets = self.buckets;
        &buckets[self.default_bucket]
    }

    /// Index of the bucket a raw status falls into.
    #[must_use]
    pub fn bucket_index(&self, raw: Option<&str>) -> usize {
        let Some(token) = raw.map(|s| s.trim().to_lowercase()) else {
            return self.default_bucket;
        };

        self.buckets
            .iter()
            .position(|bucket| bucket.tokens.contains(&token.as_str()))
            .unwrap_or(self.default_bucket)
    }

    /// Counts statuses per bucket, dropping empty buckets.
    ///
    /// Buckets are emitted in declared order regardless of their counts.
    pub fn classify<'a, I>(&self, statuses: I) -> Vec<StatusBreakdown>
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        let mut counts = vec![0_u64; self.buckets.len()];
        for status in statuses {
            counts[self.bucket_index(status)] += 1;
        }

        self.buckets
            .iter()
            .zip(counts)
            .filter(|(_, count)| *count > 0)
            .map(|(bucket, value)| StatusBreakdown {
                name: bucket.name.to_string(),
                value,
                color: bucket.color,
            })
            .collect()
    }
}

/// Status breakdown of drivers.
///
/// # Errors
///
/// Returns an error if the employee scan fails.
pub async fn driver_status<S>(store: &S) -> Result<Vec<StatusBreakdown>, DashboardError>
where
    S: DocumentStore + ?Sized,
{
    let docs = store.scan(Collection::Funcionarios).await?;
    let employees: Vec<Employee> = decode_all(&docs);

    Ok(PERSON_STATUS.classify(
        employees
            .iter()
            .filter(|e| e.is_driver())
            .map(|e| e.status.as_deref()),
    ))
}

/// Status breakdown of vehicles.
///
/// # Errors
///
/// Returns an error if the vehicle scan fails.
pub async fn vehicle_status<S>(store: &S) -> Result<Vec<StatusBreakdown>, DashboardError>
where
    S: DocumentStore + ?Sized,
{
    let docs = store.scan(Collection::Veiculos).await?;
    let vehicles: Vec<Vehicle> = decode_all(&docs);

    Ok(VEHICLE_STATUS.classify(vehicles.iter().map(|v| v.status.as_deref())))
}
