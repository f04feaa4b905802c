//! # Built-in Fallback Catalog
//!
//! The fixed 20-item menu used to seed an empty catalog store and returned
//! as-is when the storage layer fails on the customer-facing read path.
//!
//! Item ids are stable: they seed the `menu_items` table verbatim, and the
//! self-healing availability toggle re-inserts a missing seed item under
//! its original id.

use crate::types::{CustomizationGroup, Customizations, MenuItem};

fn groups(defs: &[(&str, &[&str], u32)]) -> Customizations {
    Customizations {
        options: defs
            .iter()
            .map(|(name, choices, max)| CustomizationGroup {
                name: (*name).to_string(),
                choices: choices.iter().map(|c| (*c).to_string()).collect(),
                max_choices: *max,
            })
            .collect(),
    }
}

#[allow(clippy::too_many_arguments)]
fn item(
    id: i64,
    name: &str,
    description: &str,
    price: f64,
    category: &str,
    image_url: &str,
    is_vegetarian: bool,
    is_best_seller: bool,
    customizations: Customizations,
) -> MenuItem {
    MenuItem {
        id,
        name: name.to_string(),
        description: description.to_string(),
        price,
        category: category.to_string(),
        image_url: image_url.to_string(),
        is_vegetarian,
        is_best_seller,
        is_available: true,
        customizations,
    }
}

/// The built-in 20-item catalog.
pub fn fallback_menu() -> Vec<MenuItem> {
    const SPICE: (&str, &[&str], u32) = ("Spice Level", &["Mild", "Medium", "Hot"], 1);
    const BREAD: (&str, &[&str], u32) = ("Bread", &["Naan", "Roti", "Paratha"], 1);

    vec![
        item(
            1,
            "Vegetable Manchurian",
            "Crispy vegetable dumplings in a spicy Indo-Chinese sauce",
            349.0,
            "Starters",
            "https://images.unsplash.com/photo-1585032226651-759b368d7246",
            true,
            true,
            groups(&[SPICE, ("Sauce", &["Dry", "With Gravy"], 1)]),
        ),
        item(
            2,
            "Paneer Popcorn",
            "Bite-sized crispy cottage cheese fritters with Indian spices",
            399.0,
            "Starters",
            "https://images.unsplash.com/photo-1631452180519-c014fe946bc7",
            true,
            false,
            groups(&[
                SPICE,
                ("Dips", &["Mint Chutney", "Tamarind Chutney", "Tomato Sauce"], 2),
            ]),
        ),
        item(
            3,
            "Mutter Paneer",
            "Fresh cottage cheese and green peas in rich tomato gravy",
            449.0,
            "Main Course",
            "https://images.unsplash.com/photo-1631452180775-7c5d27efa8d4",
            true,
            true,
            groups(&[SPICE, BREAD]),
        ),
        item(
            4,
            "Malai Kofta",
            "Potato and cheese dumplings in creamy cashew sauce",
            499.0,
            "Main Course",
            "https://images.unsplash.com/photo-1585032226639-91c2e508a542",
            true,
            true,
            groups(&[SPICE, BREAD]),
        ),
        item(
            5,
            "Hyderabadi Chicken Biryani",
            "Aromatic basmati rice cooked with spiced chicken and herbs",
            549.0,
            "Rice and Biryani",
            "https://images.unsplash.com/photo-1589302168068-964664d93dc0",
            false,
            true,
            groups(&[SPICE, ("Add-ons", &["Raita", "Salan", "Extra Gravy"], 2)]),
        ),
        item(
            6,
            "Masala Dosa",
            "Crispy rice crepe filled with spiced potato masala",
            349.0,
            "South Indian",
            "https://images.unsplash.com/photo-1589301760014-d929f3979dbc",
            true,
            false,
            groups(&[
                (
                    "Accompaniments",
                    &["Coconut Chutney", "Sambar", "Tomato Chutney"],
                    3,
                ),
                ("Extra Filling", &["More Potato", "Onion", "Cheese"], 1),
            ]),
        ),
        item(
            7,
            "Chana Masala with Rice",
            "Spiced chickpeas curry served with steamed basmati rice",
            399.0,
            "Fast Food",
            "https://images.unsplash.com/photo-1585032226634-b2ef638c7350",
            true,
            true,
            groups(&[SPICE, ("Add-ons", &["Raita", "Papad", "Extra Rice"], 2)]),
        ),
        item(
            8,
            "Idli Sambhar",
            "Steamed rice cakes served with lentil soup and chutneys",
            299.0,
            "South Indian",
            "https://images.unsplash.com/photo-1589301841844-1cf2d77f9b36",
            true,
            false,
            groups(&[
                (
                    "Accompaniments",
                    &["Coconut Chutney", "Tomato Chutney", "Extra Sambhar"],
                    3,
                ),
                ("Extra Items", &["Vada", "Podi", "Ghee"], 2),
            ]),
        ),
        item(
            9,
            "Butter Chicken",
            "Tender chicken pieces in rich tomato and butter gravy",
            599.0,
            "Main Course",
            "https://images.unsplash.com/photo-1603894584373-5ac82b2ae398",
            false,
            true,
            groups(&[SPICE, BREAD]),
        ),
        item(
            10,
            "Chicken Biryani",
            "Fragrant basmati rice cooked with tender chicken and aromatic spices",
            549.0,
            "Rice and Biryani",
            "https://images.unsplash.com/photo-1563379091339-03b21ab4a4f8",
            false,
            true,
            groups(&[SPICE, ("Add-ons", &["Raita", "Salan", "Extra Gravy"], 2)]),
        ),
        item(
            11,
            "Mutton Rogan Josh",
            "Tender mutton pieces cooked in Kashmiri style spicy gravy",
            649.0,
            "Main Course",
            "https://images.unsplash.com/photo-1545247181-516773cae754",
            false,
            false,
            groups(&[SPICE, BREAD]),
        ),
        item(
            12,
            "Fish Curry",
            "Fresh fish simmered in coconut-based curry sauce",
            599.0,
            "Main Course",
            "https://images.unsplash.com/photo-1626777552726-4a6b54c97e46",
            false,
            false,
            groups(&[
                SPICE,
                ("Rice Type", &["Steamed Rice", "Jeera Rice", "No Rice"], 1),
            ]),
        ),
        item(
            13,
            "Gulab Jamun",
            "Sweet dumplings made from milk solids, soaked in sugar syrup",
            249.0,
            "Desserts",
            "https://images.unsplash.com/photo-1589301841844-1cf2d77f9b36",
            true,
            true,
            groups(&[
                ("Portion", &["2 pieces", "4 pieces", "6 pieces"], 1),
                ("Temperature", &["Warm", "Room Temperature"], 1),
            ]),
        ),
        item(
            14,
            "Gajar Ka Halwa",
            "Traditional carrot pudding made with milk, cardamom, and nuts",
            279.0,
            "Desserts",
            "https://images.unsplash.com/photo-1546269795-e3f9f5a00e9e",
            true,
            true,
            groups(&[
                ("Add-ons", &["Extra Nuts", "Extra Raisins", "Plain"], 1),
                ("Temperature", &["Warm", "Room Temperature"], 1),
            ]),
        ),
        item(
            15,
            "Rasmalai",
            "Soft cottage cheese dumplings in creamy saffron milk",
            299.0,
            "Desserts",
            "https://images.unsplash.com/photo-1547127796-06bb04e4b315",
            true,
            true,
            groups(&[
                ("Portion", &["2 pieces", "3 pieces", "4 pieces"], 1),
                ("Garnish", &["Extra Pistachios", "Extra Saffron", "Plain"], 1),
            ]),
        ),
        item(
            16,
            "Kheer",
            "Traditional rice pudding with cardamom, nuts, and saffron",
            249.0,
            "Desserts",
            "https://images.unsplash.com/photo-1615832494873-b0c52d519696",
            true,
            false,
            groups(&[
                ("Add-ons", &["Extra Nuts", "Extra Raisins", "Plain"], 1),
                ("Temperature", &["Chilled", "Room Temperature"], 1),
            ]),
        ),
        item(
            17,
            "Samosa Chaat",
            "Crispy samosas topped with chickpea curry, yogurt, and chutneys",
            289.0,
            "Starters",
            "https://images.unsplash.com/photo-1630409351217-bc4fa6422075",
            true,
            true,
            groups(&[
                SPICE,
                ("Toppings", &["Extra Chutney", "Extra Yogurt", "Extra Onions"], 2),
            ]),
        ),
        item(
            18,
            "Onion Bhaji",
            "Crispy onion fritters with Indian spices and herbs",
            259.0,
            "Starters",
            "https://images.unsplash.com/photo-1601050690597-df0568f70950",
            true,
            false,
            groups(&[
                ("Portion", &["4 pieces", "6 pieces", "8 pieces"], 1),
                (
                    "Accompaniments",
                    &["Mint Chutney", "Tamarind Chutney", "Both"],
                    1,
                ),
            ]),
        ),
        item(
            19,
            "Paneer Tikka",
            "Grilled cottage cheese marinated in yogurt and Indian spices",
            399.0,
            "Starters",
            "https://images.unsplash.com/photo-1599487488170-d11ec9c172f0",
            true,
            true,
            groups(&[SPICE, ("Style", &["Classic", "Malai", "Hariyali"], 1)]),
        ),
        item(
            20,
            "Dahi Puri",
            "Crispy puris filled with potatoes, yogurt, and tangy chutneys",
            279.0,
            "Starters",
            "https://images.unsplash.com/photo-1626544827763-d516dce335e2",
            true,
            false,
            groups(&[("Portion", &["6 pieces", "8 pieces", "10 pieces"], 1), SPICE]),
        ),
    ]
}

/// Looks up a seed item by id (self-healing availability path).
pub fn seed_item(id: i64) -> Option<MenuItem> {
    fallback_menu().into_iter().find(|item| item.id == id)
}
