use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt::Display;

/// Type-safe identifier for menu items. Serialized as a bare integer.
///
/// Reads either `7` or `"7"`, since menus synced from the server carry their
/// ids as strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct MenuItemId(pub u32);

impl<'de> Deserialize<'de> for MenuItemId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u32),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(Self(n)),
            Raw::Text(text) => text
                .trim()
                .parse()
                .map(Self)
                .map_err(|_| de::Error::custom(format!("menu item id {text:?} is not a number"))),
        }
    }
}

impl From<u32> for MenuItemId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for MenuItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "item_{}", self.0)
    }
}

/// How hot a dish is made. Only equality matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpiceLevel {
    Mild,
    #[default]
    Medium,
    Hot,
}

impl SpiceLevel {
    pub const ALL: [SpiceLevel; 3] = [SpiceLevel::Mild, SpiceLevel::Medium, SpiceLevel::Hot];
}

impl Display for SpiceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            SpiceLevel::Mild => "mild",
            SpiceLevel::Medium => "medium",
            SpiceLevel::Hot => "hot",
        })
    }
}

/// Dietary flag shown next to each dish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Diet {
    #[default]
    Veg,
    Nonveg,
}

/// Categories the admin console offers by default.
pub const DEFAULT_CATEGORIES: [&str; 4] = ["Starters", "Main Course", "Desserts", "Beverages"];

/// A dish on the menu.
///
/// # Actor Framework
/// Implements [`ActorEntity`](crate::framework::ActorEntity) in
/// [`menu_actor::entity`](crate::menu_actor::entity); the cart only ever reads it.
///
/// Field names serialize in the storefront's camelCase JSON shape, with the
/// dietary flag stored as `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: MenuItemId,
    pub name: String,
    pub price: f64,
    pub category: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type", default)]
    pub diet: Diet,
    /// Spice level suggested by the kitchen; the cart line picks its own.
    #[serde(default)]
    pub spice_level: SpiceLevel,
}

impl MenuItem {
    /// Creates a menu item with an empty image and description.
    ///
    /// # Arguments
    /// * `id` - Catalog identifier
    /// * `name` - Display name
    /// * `price` - Unit price
    /// * `category` - Menu section, e.g. "Starters"
    pub fn new(
        id: MenuItemId,
        name: impl Into<String>,
        price: f64,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            category: category.into(),
            image: String::new(),
            description: String::new(),
            diet: Diet::default(),
            spice_level: SpiceLevel::default(),
        }
    }

    pub fn with_diet(mut self, diet: Diet) -> Self {
        self.diet = diet;
        self
    }

    pub fn with_spice_level(mut self, spice_level: SpiceLevel) -> Self {
        self.spice_level = spice_level;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }
}

/// The menu a fresh install starts with, before the admin edits anything.
pub fn default_menu() -> Vec<MenuItem> {
    vec![
        MenuItem::new(MenuItemId(1), "Paneer Tikka", 220.0, "Starters")
            .with_description("Cottage cheese cubes charred in the tandoor")
            .with_spice_level(SpiceLevel::Hot),
        MenuItem::new(MenuItemId(2), "Chicken 65", 240.0, "Starters")
            .with_description("Crisp fried chicken with curry leaves")
            .with_diet(Diet::Nonveg)
            .with_spice_level(SpiceLevel::Hot),
        MenuItem::new(MenuItemId(3), "Masala Dosa", 120.0, "Main Course")
            .with_description("Rice crepe filled with spiced potato"),
        MenuItem::new(MenuItemId(4), "Butter Chicken", 320.0, "Main Course")
            .with_description("Tandoori chicken in a tomato butter gravy")
            .with_diet(Diet::Nonveg)
            .with_spice_level(SpiceLevel::Mild),
        MenuItem::new(MenuItemId(5), "Dal Makhani", 180.0, "Main Course")
            .with_description("Black lentils slow cooked overnight")
            .with_spice_level(SpiceLevel::Mild),
        MenuItem::new(MenuItemId(6), "Gulab Jamun", 90.0, "Desserts")
            .with_description("Milk dumplings in rose syrup")
            .with_spice_level(SpiceLevel::Mild),
        MenuItem::new(MenuItemId(7), "Mango Lassi", 80.0, "Beverages")
            .with_spice_level(SpiceLevel::Mild),
        MenuItem::new(MenuItemId(8), "Masala Chai", 30.0, "Beverages")
            .with_spice_level(SpiceLevel::Mild),
    ]
}

/// Payload for adding a dish to the menu.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemCreate {
    pub name: String,
    pub price: f64,
    pub category: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type", default)]
    pub diet: Diet,
    #[serde(default)]
    pub spice_level: SpiceLevel,
}

impl MenuItemCreate {
    pub fn new(name: impl Into<String>, price: f64, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            price,
            category: category.into(),
            image: String::new(),
            description: String::new(),
            diet: Diet::default(),
            spice_level: SpiceLevel::default(),
        }
    }

    pub fn with_diet(mut self, diet: Diet) -> Self {
        self.diet = diet;
        self
    }

    pub fn with_spice_level(mut self, spice_level: SpiceLevel) -> Self {
        self.spice_level = spice_level;
        self
    }
}

/// Partial update from the admin edit form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemUpdate {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub image: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub diet: Option<Diet>,
    pub spice_level: Option<SpiceLevel>,
}
