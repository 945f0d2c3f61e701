//! Static reference data: the top 5 pizzas in the world.
//!
//! This is the entire "database" of the demo server. The records are fixed
//! for the process lifetime and never user-mutable.

use serde::Serialize;

/// A single pizza reference record.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pizza {
    /// Rank within the list; 1 is best. Ranks are dense and unique.
    pub rank: u8,
    pub name: &'static str,
    pub origin: &'static str,
    pub description: &'static str,
    pub year_created: u16,
    /// Ordered list of the defining ingredients.
    pub key_ingredients: &'static [&'static str],
}

/// The five records served by `get_top_pizzas`, in rank order.
pub const TOP_PIZZAS: [Pizza; 5] = [
    Pizza {
        rank: 1,
        name: "Margherita",
        origin: "Naples, Italy",
        description: "A classic pizza with tomato sauce, fresh mozzarella, and basil",
        year_created: 1889,
        key_ingredients: &[
            "San Marzano tomatoes",
            "Mozzarella di Bufala",
            "Fresh basil",
            "Olive oil",
        ],
    },
    Pizza {
        rank: 2,
        name: "Neapolitan",
        origin: "Naples, Italy",
        description: "The original pizza with a thin, soft crust and minimal toppings",
        year_created: 1750,
        key_ingredients: &["Tomato sauce", "Olive oil", "Garlic", "Oregano"],
    },
    Pizza {
        rank: 3,
        name: "Pepperoni",
        origin: "United States",
        description: "An American classic with pepperoni sausage and cheese",
        year_created: 1950,
        key_ingredients: &[
            "Pepperoni",
            "Mozzarella cheese",
            "Tomato sauce",
            "Italian herbs",
        ],
    },
    Pizza {
        rank: 4,
        name: "Four Cheese (Quattro Formaggi)",
        origin: "Italy",
        description: "A rich pizza featuring four different types of cheese",
        year_created: 1960,
        key_ingredients: &["Mozzarella", "Gorgonzola", "Parmigiano-Reggiano", "Ricotta"],
    },
    Pizza {
        rank: 5,
        name: "Hawaiian",
        origin: "Canada",
        description: "A controversial but popular pizza with ham and pineapple",
        year_created: 1962,
        key_ingredients: &["Ham", "Pineapple", "Mozzarella cheese", "Tomato sauce"],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks_are_dense_and_unique() {
        assert_eq!(TOP_PIZZAS.len(), 5);
        for (i, pizza) in TOP_PIZZAS.iter().enumerate() {
            assert_eq!(pizza.rank as usize, i + 1);
        }
    }

    #[test]
    fn every_record_is_complete() {
        for pizza in &TOP_PIZZAS {
            assert!(!pizza.name.is_empty());
            assert!(!pizza.origin.is_empty());
            assert!(!pizza.description.is_empty());
            assert!(pizza.year_created >= 1700);
            assert!(!pizza.key_ingredients.is_empty());
        }
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let value = serde_json::to_value(&TOP_PIZZAS[0]).unwrap();
        assert_eq!(value["yearCreated"], 1889);
        assert_eq!(value["keyIngredients"][0], "San Marzano tomatoes");
    }
}
