use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::db::schema::drinks;

/// One ingredient of a drink recipe, in pour order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Ingredient {
    pub color: String,
    pub name: String,
    pub parts: i32,
}

/// Ingredient as rendered in the public short view (name withheld).
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct IngredientShort {
    pub color: String,
    pub parts: i32,
}

/// A drinks-table row. `recipe` holds the JSON serialization of an ordered
/// ingredient list and is parsed on read.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = drinks)]
pub struct DrinkRecord {
    pub id: i32,
    pub title: String,
    pub recipe: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = drinks)]
pub struct NewDrink {
    pub title: String,
    pub recipe: String,
}

#[derive(Debug, Default, AsChangeset)]
#[diesel(table_name = drinks)]
pub struct DrinkChanges {
    pub title: Option<String>,
    pub recipe: Option<String>,
}

impl DrinkChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.recipe.is_none()
    }
}

/// Full drink representation, for authenticated consumers.
#[derive(Debug, Serialize, ToSchema)]
pub struct DrinkLong {
    pub id: i32,
    pub title: String,
    pub recipe: Vec<Ingredient>,
}

/// Public drink representation with ingredient names omitted.
#[derive(Debug, Serialize, ToSchema)]
pub struct DrinkShort {
    pub id: i32,
    pub title: String,
    pub recipe: Vec<IngredientShort>,
}

impl DrinkRecord {
    pub fn ingredients(&self) -> Result<Vec<Ingredient>, serde_json::Error> {
        serde_json::from_str(&self.recipe)
    }

    pub fn long(&self) -> Result<DrinkLong, serde_json::Error> {
        Ok(DrinkLong {
            id: self.id,
            title: self.title.clone(),
            recipe: self.ingredients()?,
        })
    }

    pub fn short(&self) -> Result<DrinkShort, serde_json::Error> {
        let recipe = self
            .ingredients()?
            .into_iter()
            .map(|i| IngredientShort {
                color: i.color,
                parts: i.parts,
            })
            .collect();

        Ok(DrinkShort {
            id: self.id,
            title: self.title.clone(),
            recipe,
        })
    }
}
