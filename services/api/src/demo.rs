use crate::infra::{build_catalog, Catalog};
use clap::Args;
use rentify::accounts::{RoleFilter, UserId, UserRole};
use rentify::config::{AppConfig, CatalogConfig};
use rentify::error::AppError;
use rentify::listings::{
    AdminStatusFilter, DealType, ListingFilter, ModerationStatus, Property, PropertyId,
    PropertyType,
};
use rentify::telemetry;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct ListingSearchArgs {
    /// Case-insensitive text matched against title, city, district, and type
    #[arg(long)]
    pub(crate) query: Option<String>,
    /// Restrict to one property type (apartment, house, villa, office, land, commercial)
    #[arg(long = "type")]
    pub(crate) property_type: Option<PropertyType>,
    /// Restrict to rent or sale listings
    #[arg(long)]
    pub(crate) deal_type: Option<DealType>,
    /// Restrict to one moderation status (pending, approved, rejected)
    #[arg(long)]
    pub(crate) status: Option<ModerationStatus>,
    /// Only show verified listings
    #[arg(long)]
    pub(crate) verified: bool,
    /// Only show featured listings
    #[arg(long)]
    pub(crate) featured: bool,
}

impl ListingSearchArgs {
    fn into_filter(self) -> ListingFilter {
        ListingFilter {
            query: self.query,
            property_type: self.property_type,
            deal_type: self.deal_type,
            status: self.status,
            verified: self.verified.then_some(true),
            featured: self.featured.then_some(true),
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct ModerationStatusArgs {
    /// Listing id
    pub(crate) id: String,
    /// New status (pending, approved, rejected)
    pub(crate) status: ModerationStatus,
    /// Reviewer notes; omitting them clears any previous notes
    #[arg(long)]
    pub(crate) notes: Option<String>,
    /// Acting user id (must be an admin)
    #[arg(long, default_value = "1")]
    pub(crate) actor: String,
}

#[derive(Args, Debug)]
pub(crate) struct VerificationArgs {
    /// Listing id
    pub(crate) id: String,
    /// Acting user id (must be an admin)
    #[arg(long, default_value = "1")]
    pub(crate) actor: String,
}

fn bootstrap() -> Result<Arc<Catalog>, AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry, config.environment)?;
    Ok(build_catalog(&config.catalog)?)
}

pub(crate) fn run_listing_search(args: ListingSearchArgs) -> Result<(), AppError> {
    let catalog = bootstrap()?;
    let listings = catalog.listings().filter(&args.into_filter())?;
    print!("{}", render_listings(&listings));
    Ok(())
}

pub(crate) fn run_listing_show(id: String) -> Result<(), AppError> {
    let catalog = bootstrap()?;
    let id = PropertyId(id);
    match catalog.listings().find_by_id(&id)? {
        Some(property) => match serde_json::to_string_pretty(&property) {
            Ok(json) => println!("{json}"),
            Err(err) => println!("Listing {id} could not be rendered: {err}"),
        },
        None => println!("Listing {id} not found"),
    }
    Ok(())
}

pub(crate) fn run_moderation_status(args: ModerationStatusArgs) -> Result<(), AppError> {
    let catalog = bootstrap()?;
    let ModerationStatusArgs {
        id,
        status,
        notes,
        actor,
    } = args;

    let updated = catalog.moderate(&UserId(actor), &PropertyId(id), status, notes)?;
    println!("{}", render_moderation_line(&updated));
    Ok(())
}

pub(crate) fn run_verification_toggle(args: VerificationArgs) -> Result<(), AppError> {
    let catalog = bootstrap()?;
    let updated = catalog.toggle_verification(&UserId(args.actor), &PropertyId(args.id))?;
    println!("{}", render_moderation_line(&updated));
    Ok(())
}

pub(crate) fn run_demo() -> Result<(), AppError> {
    let catalog = build_catalog(&CatalogConfig::default())?;
    print!("{}", demo_transcript(&catalog)?);
    Ok(())
}

/// Scripted walkthrough against the given catalog, returned as printable text.
fn demo_transcript(catalog: &Catalog) -> Result<String, AppError> {
    let mut out = String::from("Rentify catalog demo\n");

    let admin = catalog
        .directory()
        .current_user()?
        .map(|user| user.id)
        .unwrap_or_else(|| UserId::new("1"));

    let summary = catalog.dashboard()?;
    out.push_str(&format!(
        "\nDashboard: {} listings ({} pending, {} approved, {} rejected, {} verified)\n",
        summary.properties.total,
        summary.properties.pending,
        summary.properties.approved,
        summary.properties.rejected,
        summary.properties.verified
    ));
    out.push_str(&format!(
        "Accounts: {} total ({} admin, {} agent, {} user)\n",
        summary.users.total, summary.users.admins, summary.users.agents, summary.users.users
    ));

    out.push_str("\nFeatured listings\n");
    out.push_str(&render_listings(&catalog.listings().featured()?));

    out.push_str("\nSearch \"villa\"\n");
    out.push_str(&render_listings(&catalog.listings().search("villa")?));

    out.push_str("\nModeration queue\n");
    let queue = catalog
        .listings()
        .admin_search("", AdminStatusFilter::Pending)?;
    out.push_str(&render_listings(&queue));

    if let Some(next) = queue.first() {
        let approved = catalog.moderate(
            &admin,
            &next.id,
            ModerationStatus::Approved,
            Some("Photos and description verified".to_string()),
        )?;
        out.push_str(&format!("\nApproved: {}\n", render_moderation_line(&approved)));

        let verified = catalog.toggle_verification(&admin, &next.id)?;
        out.push_str(&format!("Verified: {}\n", render_moderation_line(&verified)));
        let reverted = catalog.toggle_verification(&admin, &next.id)?;
        out.push_str(&format!("Reverted: {}\n", render_moderation_line(&reverted)));
    }

    let agents = catalog
        .directory()
        .search("", RoleFilter::Only(UserRole::Agent))?;
    if let Some(agent) = agents.first() {
        let attempt = catalog.moderate(
            &agent.id,
            &PropertyId::new("6"),
            ModerationStatus::Rejected,
            None,
        );
        match attempt {
            Ok(_) => out.push_str("\nAgent moderation unexpectedly allowed\n"),
            Err(err) => out.push_str(&format!("\nAgent {} blocked: {err}\n", agent.name)),
        }
    }

    Ok(out)
}

fn render_listings(listings: &[Property]) -> String {
    if listings.is_empty() {
        return "- none\n".to_string();
    }

    listings
        .iter()
        .map(|property| {
            format!(
                "- [{}] {} | {} {} | {}, {} | {:.0} {} | {}{}\n",
                property.id,
                property.title,
                property.property_type.label(),
                property.deal_type.label(),
                property.location.city,
                property.location.district,
                property.price,
                property.currency,
                property.moderation_status,
                if property.verified { " | verified" } else { "" }
            )
        })
        .collect()
}

fn render_moderation_line(property: &Property) -> String {
    let notes = property
        .moderation_notes
        .as_deref()
        .map(|notes| format!(" ({notes})"))
        .unwrap_or_default();
    format!(
        "{} [{}] status {}{}, verified {}, updated {}",
        property.title,
        property.id,
        property.moderation_status,
        notes,
        property.verified,
        property.updated_at.to_rfc3339()
    )
}
