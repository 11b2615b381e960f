//! Entity counts for the dashboard cards.

use futures::try_join;

use super::entity::{Employee, decode_all};
use super::error::DashboardError;
use super::types::DashboardStats;
use crate::store::{Collection, Document, DocumentStore};

fn count(len: usize) -> u64 {
    u64::try_from(len).unwrap_or(u64::MAX)
}

/// Counts from already scanned collections.
///
/// Drivers are not a collection of their own; they are counted among the
/// employees by role.
#[must_use]
pub fn compute_stats(
    funcionarios: &[Document],
    vendedores: &[Document],
    cidades: &[Document],
    veiculos: &[Document],
    rotas: &[Document],
    folgas: &[Document],
) -> DashboardStats {
    let employees: Vec<Employee> = decode_all(funcionarios);

    DashboardStats {
        funcionarios: count(employees.len()),
        motoristas: count(employees.iter().filter(|e| e.is_driver()).count()),
        vendedores: count(vendedores.len()),
        cidades: count(cidades.len()),
        veiculos: count(veiculos.len()),
        rotas: count(rotas.len()),
        folgas: count(folgas.len()),
    }
}

/// Scans every tracked collection concurrently and counts them.
///
/// # Errors
///
/// Returns the first scan failure; no partial stats are produced.
pub async fn collect_stats<S>(store: &S) -> Result<DashboardStats, DashboardError>
where
    S: DocumentStore + ?Sized,
{
    let (funcionarios, vendedores, cidades, veiculos, rotas, folgas) = try_join!(
        store.scan(Collection::Funcionarios),
        store.scan(Collection::Vendedores),
        store.scan(Collection::Cidades),
        store.scan(Collection::Veiculos),
        store.scan(Collection::Rotas),
        store.scan(Collection::Folgas),
    )?;

    Ok(compute_stats(
        &funcionarios,
        &vendedores,
        &cidades,
        &veiculos,
        &rotas,
        &folgas,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn docs(prefix: &str, n: usize) -> Vec<Document> {
        (0..n).map(|i| Document::new(format!("{prefix}{i}"))).collect()
    }

    #[tokio::test]
    async fn test_collect_stats_counts_each_collection() {
        let mut employees = docs("e", 3);
        employees.push(Document::new("d1").with("funcao", "motorista"));
        employees.push(Document::new("d2").with("funcao", "motorista"));

        let store = MemoryStore::new()
            .with_collection(Collection::Funcionarios, employees)
            .with_collection(Collection::Vendedores, docs("v", 4))
            .with_collection(Collection::Cidades, docs("c", 2))
            .with_collection(Collection::Veiculos, docs("x", 6))
            .with_collection(Collection::Rotas, docs("r", 7))
            .with_collection(Collection::Folgas, docs("f", 1));

        let stats = collect_stats(&store).await.unwrap();

        assert_eq!(
            stats,
            DashboardStats {
                funcionarios: 5,
                motoristas: 2,
                vendedores: 4,
                cidades: 2,
                veiculos: 6,
                rotas: 7,
                folgas: 1,
            }
        );
    }

    #[tokio::test]
    async fn test_collect_stats_empty_store() {
        let stats = collect_stats(&MemoryStore::new()).await.unwrap();
        assert_eq!(stats, DashboardStats::default());
    }

    #[tokio::test]
    async fn test_collect_stats_fails_atomically() {
        let store = MemoryStore::new()
            .with_collection(Collection::Funcionarios, docs("e", 3))
            .with_failure(Collection::Folgas, "permission denied");

        let err = collect_stats(&store).await.unwrap_err();
        assert!(err.to_string().contains("folgas"));
    }
}
