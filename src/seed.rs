//! Startup data for the in-memory catalog: the built-in sample set or a JSON file with the
//! same shape.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::accounts::{User, UserId, UserRole};
use crate::listings::{
    Coordinates, DealType, Location, ModerationStatus, OwnerSummary, Property, PropertyId,
    PropertyType, Specifications,
};

/// Collections the store and directory are built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedData {
    pub properties: Vec<Property>,
    #[serde(default)]
    pub users: Vec<User>,
}

impl Default for SeedData {
    fn default() -> Self {
        Self {
            properties: sample_properties(),
            users: sample_users(),
        }
    }
}

impl SeedData {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SeedError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| SeedError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| SeedError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from `path` when configured, otherwise fall back to the sample set.
    pub fn load(path: Option<&Path>) -> Result<Self, SeedError> {
        match path {
            Some(path) => Self::from_path(path),
            None => Ok(Self::default()),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("failed to read seed file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("seed file {} is not valid catalog JSON", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .expect("seed timestamps are valid UTC instants")
}

fn photo(id: &str) -> String {
    format!("https://images.unsplash.com/{id}?auto=format&fit=crop&w=2340&q=80")
}

fn avatar(id: &str) -> Option<String> {
    Some(format!(
        "https://images.unsplash.com/{id}?auto=format&fit=crop&w=987&q=80"
    ))
}

fn labels(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn owner(id: &str, name: &str, avatar_id: &str, phone: &str) -> OwnerSummary {
    OwnerSummary {
        id: id.to_string(),
        name: name.to_string(),
        avatar: avatar(avatar_id),
        phone: Some(phone.to_string()),
    }
}

fn location(city: &str, district: &str, address: &str, lat: f64, lon: f64) -> Location {
    Location {
        city: city.to_string(),
        district: district.to_string(),
        address: address.to_string(),
        coordinates: Some(Coordinates {
            latitude: lat,
            longitude: lon,
        }),
    }
}

/// The six demo listings in catalog order.
pub fn sample_properties() -> Vec<Property> {
    vec![
        Property {
            id: PropertyId::new("1"),
            title: "Modern Apartment with City View".to_string(),
            description: "Luxurious apartment with panoramic city views, modern amenities, and prime location.".to_string(),
            price: 1200.0,
            currency: "USD".to_string(),
            location: location("New York", "Manhattan", "123 Broadway St", 40.7128, -74.006),
            specifications: Specifications { area: 85, bedrooms: 2, bathrooms: 2, parking: 1 },
            amenities: labels(&["Air Conditioning", "Elevator", "Gym", "Swimming Pool", "Security"]),
            images: vec![
                photo("photo-1522708323590-d24dbb6b0267"),
                photo("photo-1560448204-e02f11c3d0e2"),
                photo("photo-1484154218962-a197022b5858"),
            ],
            property_type: PropertyType::Apartment,
            deal_type: DealType::Rent,
            featured: true,
            verified: true,
            moderation_status: ModerationStatus::Approved,
            moderation_notes: None,
            owner: owner("101", "John Smith", "photo-1500648767791-00dcc994a43e", "+1 (555) 123-4567"),
            created_at: at(2023, 9, 15, 10, 30),
            updated_at: at(2023, 9, 15, 10, 30),
        },
        Property {
            id: PropertyId::new("2"),
            title: "Spacious Family House with Garden".to_string(),
            description: "Beautiful family house with a large garden, perfect for families.".to_string(),
            price: 450_000.0,
            currency: "USD".to_string(),
            location: location("Los Angeles", "Beverly Hills", "456 Palm Avenue", 34.0522, -118.2437),
            specifications: Specifications { area: 220, bedrooms: 4, bathrooms: 3, parking: 2 },
            amenities: labels(&["Garden", "Fireplace", "Garage", "Balcony", "BBQ Area"]),
            images: vec![
                photo("photo-1564013799919-ab600027ffc6"),
                photo("photo-1512917774080-9991f1c4c750"),
                photo("photo-1600585154340-be6161a56a0c"),
            ],
            property_type: PropertyType::House,
            deal_type: DealType::Sale,
            featured: true,
            verified: true,
            moderation_status: ModerationStatus::Approved,
            moderation_notes: None,
            owner: owner("102", "Emily Johnson", "photo-1494790108377-be9c29b29330", "+1 (555) 987-6543"),
            created_at: at(2023, 9, 10, 14, 45),
            updated_at: at(2023, 9, 14, 9, 20),
        },
        Property {
            id: PropertyId::new("3"),
            title: "Luxury Villa with Ocean View".to_string(),
            description: "Stunning luxury villa with breathtaking ocean views and private pool.".to_string(),
            price: 2_500_000.0,
            currency: "USD".to_string(),
            location: location("Miami", "Miami Beach", "789 Ocean Drive", 25.7617, -80.1918),
            specifications: Specifications { area: 450, bedrooms: 5, bathrooms: 6, parking: 3 },
            amenities: labels(&[
                "Swimming Pool",
                "Ocean View",
                "Home Theater",
                "Wine Cellar",
                "Smart Home",
                "Private Beach Access",
            ]),
            images: vec![
                photo("photo-1613977257363-707ba9348227"),
                photo("photo-1613977257592-4a9a32f9141b"),
                photo("photo-1615529182904-14819c35db37"),
            ],
            property_type: PropertyType::Villa,
            deal_type: DealType::Sale,
            featured: true,
            verified: false,
            moderation_status: ModerationStatus::Pending,
            moderation_notes: None,
            owner: owner("103", "Michael Brown", "photo-1507003211169-0a1dd7228f2d", "+1 (555) 456-7890"),
            created_at: at(2023, 9, 5, 8, 15),
            updated_at: at(2023, 9, 12, 16, 30),
        },
        Property {
            id: PropertyId::new("4"),
            title: "Modern Office Space in Business District".to_string(),
            description: "Prime office space in the heart of the business district with modern amenities.".to_string(),
            price: 3500.0,
            currency: "USD".to_string(),
            location: location("Chicago", "Downtown", "101 Business Plaza", 41.8781, -87.6298),
            specifications: Specifications { area: 150, bedrooms: 0, bathrooms: 2, parking: 5 },
            amenities: labels(&[
                "High-Speed Internet",
                "Conference Rooms",
                "Reception Area",
                "Security",
                "Elevator",
            ]),
            images: vec![
                photo("photo-1497366216548-37526070297c"),
                photo("photo-1497366811353-6870744d04b2"),
            ],
            property_type: PropertyType::Office,
            deal_type: DealType::Rent,
            featured: false,
            verified: false,
            moderation_status: ModerationStatus::Approved,
            moderation_notes: None,
            owner: owner("104", "Sarah Wilson", "photo-1438761681033-6461ffad8d80", "+1 (555) 789-0123"),
            created_at: at(2023, 9, 8, 11, 20),
            updated_at: at(2023, 9, 8, 11, 20),
        },
        Property {
            id: PropertyId::new("5"),
            title: "Cozy Studio Apartment in Historic District".to_string(),
            description: "Charming studio apartment in the historic district, perfect for singles or couples.".to_string(),
            price: 850.0,
            currency: "USD".to_string(),
            location: location("Boston", "Beacon Hill", "222 Heritage Street", 42.3601, -71.0589),
            specifications: Specifications { area: 45, bedrooms: 0, bathrooms: 1, parking: 0 },
            amenities: labels(&["Furnished", "Laundry", "Historic Building", "Public Transport Nearby"]),
            images: vec![
                photo("photo-1502672260266-1c1ef2d93688"),
                photo("photo-1554995207-c18c203602cb"),
            ],
            property_type: PropertyType::Apartment,
            deal_type: DealType::Rent,
            featured: false,
            verified: false,
            moderation_status: ModerationStatus::Rejected,
            moderation_notes: Some(
                "Images do not match the description. Please provide accurate photos of the property."
                    .to_string(),
            ),
            owner: owner("105", "David Lee", "photo-1599566150163-29194dcaad36", "+1 (555) 234-5678"),
            created_at: at(2023, 9, 12, 9, 45),
            updated_at: at(2023, 9, 12, 9, 45),
        },
        Property {
            id: PropertyId::new("6"),
            title: "Commercial Space in Shopping Center".to_string(),
            description: "Prime commercial space in a busy shopping center with high foot traffic.".to_string(),
            price: 4200.0,
            currency: "USD".to_string(),
            location: location("San Francisco", "Marina", "333 Retail Row", 37.7749, -122.4194),
            specifications: Specifications { area: 120, bedrooms: 0, bathrooms: 1, parking: 10 },
            amenities: labels(&["High Foot Traffic", "Storage Space", "Security", "Parking"]),
            images: vec![
                photo("photo-1604328698692-f76ea9498e76"),
                photo("photo-1613665813446-82a78c468a1d"),
                photo("photo-1582037928769-181cf6ea7e9f"),
            ],
            property_type: PropertyType::Commercial,
            deal_type: DealType::Rent,
            featured: false,
            verified: false,
            moderation_status: ModerationStatus::Pending,
            moderation_notes: None,
            owner: owner("106", "Jennifer Martinez", "photo-1580489944761-15a19d654956", "+1 (555) 345-6789"),
            created_at: at(2023, 9, 7, 13, 10),
            updated_at: at(2023, 9, 11, 10, 25),
        },
    ]
}

/// Demo accounts. The first one is the admin used as the signed-in session.
pub fn sample_users() -> Vec<User> {
    vec![
        User {
            id: UserId::new("1"),
            name: "John Smith".to_string(),
            email: "john.smith@example.com".to_string(),
            phone: Some("+1 (555) 123-4567".to_string()),
            avatar: avatar("photo-1500648767791-00dcc994a43e"),
            role: UserRole::Admin,
            created_at: at(2023, 1, 15, 10, 30),
        },
        User {
            id: UserId::new("2"),
            name: "Emily Johnson".to_string(),
            email: "emily.johnson@example.com".to_string(),
            phone: Some("+1 (555) 987-6543".to_string()),
            avatar: avatar("photo-1494790108377-be9c29b29330"),
            role: UserRole::Agent,
            created_at: at(2023, 2, 20, 14, 45),
        },
        User {
            id: UserId::new("3"),
            name: "Michael Brown".to_string(),
            email: "michael.brown@example.com".to_string(),
            phone: Some("+1 (555) 456-7890".to_string()),
            avatar: avatar("photo-1507003211169-0a1dd7228f2d"),
            role: UserRole::Agent,
            created_at: at(2023, 3, 10, 8, 15),
        },
    ]
}
