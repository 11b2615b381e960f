//! Database seeder for Painel development and testing.
//!
//! Seeds employees, drivers, sellers, cities, vehicles, routes and time-off
//! requests so every dashboard section has something to show.
//!
//! Usage: cargo run --bin seeder

use chrono::{DateTime, Duration, Utc};
use painel_core::store::{Collection, Document, FieldValue, StoreTimestamp};
use painel_db::{DocumentRepository, connect};
use painel_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let database_url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => AppConfig::load()?.database.url,
    };

    println!("Connecting to database...");
    let repo = DocumentRepository::new(connect(&database_url).await?);
    let now = Utc::now();

    for (collection, documents) in seed_documents(now) {
        println!("Seeding {collection}...");
        for document in &documents {
            repo.upsert(collection, document).await?;
        }
        println!("  Upserted {} documents", documents.len());
    }

    println!("Seeding complete!");
    Ok(())
}

fn days_ago(now: DateTime<Utc>, days: i64) -> FieldValue {
    FieldValue::Timestamp(StoreTimestamp::from_date(now - Duration::days(days)))
}

fn seed_documents(now: DateTime<Utc>) -> Vec<(Collection, Vec<Document>)> {
    let employees = vec![
        Document::new("func-001")
            .with("nome", "Ana Souza")
            .with("funcao", "motorista")
            .with("status", "trabalhando")
            .with("dataCriacao", days_ago(now, 2)),
        Document::new("func-002")
            .with("nome", "Bruno Lima")
            .with("funcao", "motorista")
            .with("status", "folga")
            .with("dataCriacao", days_ago(now, 40)),
        Document::new("func-003")
            .with("nome", "Carla Dias")
            .with("funcao", "motorista")
            .with("status", "ferias")
            .with("dataCadastro", days_ago(now, 90)),
        Document::new("func-004")
            .with("nome", "Diego Alves")
            .with("funcao", "motorista")
            .with("dataCriacao", days_ago(now, 6)),
        Document::new("func-005")
            .with("nome", "Elisa Rocha")
            .with("funcao", "administrativo")
            .with("status", "trabalhando")
            .with("dataCriacao", days_ago(now, 4)),
        Document::new("func-006")
            .with("nome", "Fábio Nunes")
            .with("funcao", "mecanico")
            .with("dataCriacao", days_ago(now, 120)),
    ];

    let sellers = vec![
        Document::new("vend-001")
            .with("nome", "Gabriela Melo")
            .with("regiao", "Sul")
            .with("dataCriacao", days_ago(now, 3)),
        Document::new("vend-002")
            .with("nome", "Heitor Castro")
            .with("regiao", "Sudeste")
            .with("dataCriacao", days_ago(now, 60)),
    ];

    let cities = vec![
        Document::new("cid-001")
            .with("nome", "Porto Alegre")
            .with("estado", "RS")
            .with("dataCriacao", days_ago(now, 1)),
        Document::new("cid-002")
            .with("nome", "Curitiba")
            .with("estado", "PR")
            .with("dataCriacao", days_ago(now, 30)),
        Document::new("cid-003")
            .with("nome", "Florianópolis")
            .with("estado", "SC")
            .with("dataCriacao", days_ago(now, 200)),
    ];

    let vehicles = vec![
        Document::new("veic-001")
            .with("placa", "ABC1D23")
            .with("modelo", "Volvo FH 540")
            .with("status", "em_operacao")
            .with("dataCriacao", days_ago(now, 5)),
        Document::new("veic-002")
            .with("placa", "EFG4H56")
            .with("modelo", "Scania R450")
            .with("status", "em_uso")
            .with("dataCriacao", days_ago(now, 80)),
        Document::new("veic-003")
            .with("placa", "IJK7L89")
            .with("modelo", "Mercedes Actros")
            .with("status", "manutencao")
            .with("dataCriacao", days_ago(now, 150)),
        Document::new("veic-004")
            .with("placa", "MNO0P12")
            .with("modelo", "Iveco Daily")
            .with("status", "parado")
            .with("dataCriacao", days_ago(now, 300)),
        Document::new("veic-005")
            .with("modelo", "VW Delivery")
            .with("dataCriacao", days_ago(now, 8)),
    ];

    let routes = vec![
        Document::new("rota-001")
            .with("motoristaId", "func-001")
            .with("cidadeDestino", "Porto Alegre")
            .with("dataCriacao", days_ago(now, 0)),
        Document::new("rota-002")
            .with("motoristaId", "func-004")
            .with("destino", "Curitiba")
            .with("dataCriacao", days_ago(now, 1)),
        Document::new("rota-003")
            .with("motoristaId", "func-099")
            .with("endereco", "Av. Ipiranga, 1000")
            .with("dataCriacao", days_ago(now, 2)),
        Document::new("rota-004").with("dataCriacao", days_ago(now, 20)),
    ];

    let time_off = vec![
        Document::new("folga-001")
            .with("funcionarioId", "func-002")
            .with("status", "aprovado")
            .with("dataInicio", "20/10/2026")
            .with("dataCriacao", days_ago(now, 1)),
        Document::new("folga-002")
            .with("funcionarioId", "func-005")
            .with("status", "rejeitado")
            .with("dataInicio", days_ago(now, -7))
            .with("dataCriacao", days_ago(now, 3)),
        Document::new("folga-003")
            .with("funcionarioId", "func-003")
            .with("dataCriacao", days_ago(now, 9)),
    ];

    vec![
        (Collection::Funcionarios, employees),
        (Collection::Vendedores, sellers),
        (Collection::Cidades, cities),
        (Collection::Veiculos, vehicles),
        (Collection::Rotas, routes),
        (Collection::Folgas, time_off),
    ]
}
