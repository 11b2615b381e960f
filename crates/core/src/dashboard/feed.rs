//! Recent activity feed.
//!
//! Routes and time-off requests are events in themselves and always enter the
//! feed. Registrations (drivers, vehicles, employees, cities, sellers) only
//! enter while they are recent. Everything is merged, ordered newest first
//! and cut to one page.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use futures::try_join;

use super::entity::{
    City, Employee, Route, Seller, TimeOffRequest, TimeOffStatus, Vehicle, decode_all,
};
use super::error::DashboardError;
use super::timestamp::normalize;
use super::types::{ActivityEntry, ActivityIcon, ActivityKind, ColorTag};
use crate::store::{Collection, Document, DocumentStore, FieldValue};

/// How long a registration stays newsworthy.
pub const RECENT_WINDOW_DAYS: i64 = 15;

/// Maximum number of feed entries.
pub const FEED_LIMIT: usize = 10;

const UNKNOWN_DRIVER: &str = "Motorista não especificado";
const UNKNOWN_EMPLOYEE: &str = "Funcionário não especificado";
const UNKNOWN_DESTINATION: &str = "Destino não informado";
const UNKNOWN_DATE: &str = "data não informada";

/// Presentation options for feed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedOptions {
    /// Time zone used when rendering times into descriptions.
    pub timezone: Tz,
}

impl Default for FeedOptions {
    fn default() -> Self {
        Self {
            timezone: chrono_tz::America::Sao_Paulo,
        }
    }
}

impl FeedOptions {
    /// Renders a date and time, e.g. `17/10/2026 14:30`.
    #[must_use]
    pub fn format_datetime(&self, at: DateTime<Utc>) -> String {
        at.with_timezone(&self.timezone)
            .format("%d/%m/%Y %H:%M")
            .to_string()
    }

    /// Renders a calendar date, e.g. `17/10/2026`.
    #[must_use]
    pub fn format_date(&self, at: DateTime<Utc>) -> String {
        at.with_timezone(&self.timezone)
            .format("%d/%m/%Y")
            .to_string()
    }
}

/// Scanned collections the feed is built from.
#[derive(Debug, Clone, Default)]
pub struct FeedSources {
    /// Employees, also used to resolve names.
    pub funcionarios: Vec<Document>,
    /// Routes.
    pub rotas: Vec<Document>,
    /// Time-off requests.
    pub folgas: Vec<Document>,
    /// Vehicles.
    pub veiculos: Vec<Document>,
    /// Cities.
    pub cidades: Vec<Document>,
    /// Sellers.
    pub vendedores: Vec<Document>,
}

impl FeedSources {
    /// Scans every collection the feed needs.
    ///
    /// # Errors
    ///
    /// Returns the first scan failure.
    pub async fn scan<S>(store: &S) -> Result<Self, DashboardError>
    where
        S: DocumentStore + ?Sized,
    {
        let (funcionarios, rotas, folgas, veiculos, cidades, vendedores) = try_join!(
            store.scan(Collection::Funcionarios),
            store.scan(Collection::Rotas),
            store.scan(Collection::Folgas),
            store.scan(Collection::Veiculos),
            store.scan(Collection::Cidades),
            store.scan(Collection::Vendedores),
        )?;

        Ok(Self {
            funcionarios,
            rotas,
            folgas,
            veiculos,
            cidades,
            vendedores,
        })
    }
}

struct FeedContext {
    now: DateTime<Utc>,
    cutoff: DateTime<Utc>,
    options: FeedOptions,
}

impl FeedContext {
    fn new(now: DateTime<Utc>, options: FeedOptions) -> Self {
        Self {
            now,
            cutoff: now - Duration::days(RECENT_WINDOW_DAYS),
            options,
        }
    }

    fn time(&self, value: Option<&FieldValue>) -> DateTime<Utc> {
        normalize(value, self.now)
    }

    fn describe_date(&self, value: Option<&FieldValue>) -> String {
        match value {
            Some(FieldValue::Text(text)) if !text.trim().is_empty() => text.trim().to_string(),
            Some(
                v @ (FieldValue::Timestamp(_)
                | FieldValue::Date(_)
                | FieldValue::Integer(_)
                | FieldValue::Float(_)),
            ) => self.options.format_date(self.time(Some(v))),
            _ => UNKNOWN_DATE.to_string(),
        }
    }
}

/// Employee names by document key.
struct NameIndex<'a> {
    by_key: HashMap<&'a str, &'a Employee>,
}

impl<'a> NameIndex<'a> {
    fn new(employees: &'a [Employee]) -> Self {
        Self {
            by_key: employees.iter().map(|e| (e.key.as_str(), e)).collect(),
        }
    }

    fn name_or(&self, key: Option<&str>, fallback: &'a str) -> &'a str {
        key.and_then(|key| self.by_key.get(key).copied())
            .and_then(|employee| employee.name.as_deref())
            .unwrap_or(fallback)
    }
}

fn route_entry(route: &Route, names: &NameIndex<'_>, ctx: &FeedContext) -> ActivityEntry {
    let timestamp = ctx.time(route.created_at.as_ref());
    let driver = names.name_or(route.driver_id.as_deref(), UNKNOWN_DRIVER);
    let destination = route.destination.as_deref().unwrap_or(UNKNOWN_DESTINATION);

    ActivityEntry {
        id: format!("{}-{}", ActivityKind::Route.as_str(), route.key),
        kind: ActivityKind::Route,
        title: format!("Nova rota para {destination}"),
        description: format!("{driver} • {}", ctx.options.format_datetime(timestamp)),
        timestamp,
        icon: ActivityIcon::Map,
        color: ColorTag::Green,
    }
}

fn time_off_entry(
    request: &TimeOffRequest,
    names: &NameIndex<'_>,
    ctx: &FeedContext,
) -> ActivityEntry {
    let timestamp = ctx.time(request.created_at.as_ref());
    let employee = names.name_or(request.employee_id.as_deref(), UNKNOWN_EMPLOYEE);
    let (phrase, color) = match request.status {
        TimeOffStatus::Approved => ("aprovada", ColorTag::Green),
        TimeOffStatus::Rejected => ("rejeitada", ColorTag::Red),
        TimeOffStatus::Pending => ("solicitada", ColorTag::Blue),
    };

    ActivityEntry {
        id: format!("{}-{}", ActivityKind::TimeOff.as_str(), request.key),
        kind: ActivityKind::TimeOff,
        title: format!("Folga {phrase}: {employee}"),
        description: format!(
            "Início: {} • Solicitada em {}",
            ctx.describe_date(request.start_date.as_ref()),
            ctx.options.format_datetime(timestamp)
        ),
        timestamp,
        icon: ActivityIcon::Calendar,
        color,
    }
}

/// A newly registered record, pending the recency check.
struct Registration<'a> {
    kind: ActivityKind,
    key: &'a str,
    title: String,
    detail: Option<&'a str>,
    registered: &'static str,
    created_at: Option<&'a FieldValue>,
    icon: ActivityIcon,
    color: ColorTag,
}

impl Registration<'_> {
    fn into_entry(self, ctx: &FeedContext) -> Option<ActivityEntry> {
        let timestamp = ctx.time(self.created_at);
        if timestamp <= ctx.cutoff {
            return None;
        }

        let when = format!(
            "{} em {}",
            self.registered,
            ctx.options.format_datetime(timestamp)
        );
        let description = match self.detail {
            Some(detail) => format!("{detail} • {when}"),
            None => when,
        };

        Some(ActivityEntry {
            id: format!("{}-{}", self.kind.as_str(), self.key),
            kind: self.kind,
            title: self.title,
            description,
            timestamp,
            icon: self.icon,
            color: self.color,
        })
    }
}

fn driver_registration(driver: &Employee) -> Registration<'_> {
    Registration {
        kind: ActivityKind::Driver,
        key: &driver.key,
        title: format!(
            "Novo motorista: {}",
            driver.name.as_deref().unwrap_or("Motorista sem nome")
        ),
        detail: None,
        registered: "Cadastrado",
        created_at: driver.created_at.as_ref(),
        icon: ActivityIcon::Car,
        color: ColorTag::Green,
    }
}

fn vehicle_registration(vehicle: &Vehicle) -> Registration<'_> {
    Registration {
        kind: ActivityKind::Vehicle,
        key: &vehicle.key,
        title: format!(
            "Novo veículo: {}",
            vehicle.plate.as_deref().unwrap_or("Veículo sem placa")
        ),
        detail: vehicle.model.as_deref(),
        registered: "Cadastrado",
        created_at: vehicle.created_at.as_ref(),
        icon: ActivityIcon::Truck,
        color: ColorTag::Orange,
    }
}

fn employee_registration(employee: &Employee) -> Registration<'_> {
    Registration {
        kind: ActivityKind::Employee,
        key: &employee.key,
        title: format!(
            "Novo funcionário: {}",
            employee.name.as_deref().unwrap_or("Funcionário sem nome")
        ),
        detail: employee.role.as_deref(),
        registered: "Cadastrado",
        created_at: employee.created_at.as_ref(),
        icon: ActivityIcon::Users,
        color: ColorTag::Purple,
    }
}

fn city_registration(city: &City) -> Registration<'_> {
    Registration {
        kind: ActivityKind::City,
        key: &city.key,
        title: format!(
            "Nova cidade: {}",
            city.name.as_deref().unwrap_or("Cidade sem nome")
        ),
        detail: city.state.as_deref(),
        registered: "Cadastrada",
        created_at: city.created_at.as_ref(),
        icon: ActivityIcon::Building,
        color: ColorTag::Gray,
    }
}

fn seller_registration(seller: &Seller) -> Registration<'_> {
    Registration {
        kind: ActivityKind::Seller,
        key: &seller.key,
        title: format!(
            "Novo vendedor: {}",
            seller.name.as_deref().unwrap_or("Vendedor sem nome")
        ),
        detail: seller.region.as_deref(),
        registered: "Cadastrado",
        created_at: seller.created_at.as_ref(),
        icon: ActivityIcon::UserCheck,
        color: ColorTag::Blue,
    }
}

/// Builds the feed from scanned collections.
///
/// Entries with equal timestamps keep their arrival order: routes, time-off,
/// drivers, vehicles, employees, cities, sellers, each in scan order.
/// Employees with the driver role are announced as new drivers only, so the
/// employee registrations cover the remaining roles.
#[must_use]
pub fn build_feed(
    sources: &FeedSources,
    now: DateTime<Utc>,
    options: FeedOptions,
) -> Vec<ActivityEntry> {
    let ctx = FeedContext::new(now, options);

    let employees: Vec<Employee> = decode_all(&sources.funcionarios);
    let routes: Vec<Route> = decode_all(&sources.rotas);
    let requests: Vec<TimeOffRequest> = decode_all(&sources.folgas);
    let vehicles: Vec<Vehicle> = decode_all(&sources.veiculos);
    let cities: Vec<City> = decode_all(&sources.cidades);
    let sellers: Vec<Seller> = decode_all(&sources.vendedores);
    let names = NameIndex::new(&employees);

    let mut entries: Vec<ActivityEntry> = routes
        .iter()
        .map(|route| route_entry(route, &names, &ctx))
        .chain(
            requests
                .iter()
                .map(|request| time_off_entry(request, &names, &ctx)),
        )
        .collect();

    let registrations = employees
        .iter()
        .filter(|e| e.is_driver())
        .map(driver_registration)
        .chain(vehicles.iter().map(vehicle_registration))
        .chain(
            employees
                .iter()
                .filter(|e| !e.is_driver())
                .map(employee_registration),
        )
        .chain(cities.iter().map(city_registration))
        .chain(sellers.iter().map(seller_registration));

    entries.extend(registrations.filter_map(|r| r.into_entry(&ctx)));

    // Stable: ties keep arrival order.
    entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    entries.truncate(FEED_LIMIT);
    entries
}

/// Scans the store and builds the feed.
///
/// # Errors
///
/// Returns the first scan failure; no partial feed is produced.
pub async fn recent_activity<S>(
    store: &S,
    now: DateTime<Utc>,
    options: FeedOptions,
) -> Result<Vec<ActivityEntry>, DashboardError>
where
    S: DocumentStore + ?Sized,
{
    let sources = FeedSources::scan(store).await?;
    Ok(build_feed(&sources, now, options))
}
