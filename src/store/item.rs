//! # Item Model
//!
//! The single record shape stored in the "items" collection, plus the
//! insert and update field sets.

use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, Bson, DateTime, Document};
use serde::{Deserialize, Serialize};

/// A stored item document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Database-assigned storage key, immutable once set
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub key: Option<ObjectId>,

    /// Application-assigned sequential identifier, unique-indexed
    pub id: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    pub gender: String,

    pub item_label: String,

    #[serde(default)]
    pub currency_amount: String,

    pub quantity_label: String,

    /// Set at insert, never touched by updates
    pub created_at: DateTime,
}

/// Fields for a new item; the adapter stamps `created_at` and the
/// database assigns the storage key
#[derive(Debug, Clone)]
pub struct NewItem {
    pub id: i64,
    pub name: Option<String>,
    pub gender: String,
    pub item_label: String,
    pub currency_amount: String,
    pub quantity_label: String,
}

impl NewItem {
    /// Materialize the document to insert, stamping the creation time
    pub fn into_item(self) -> Item {
        Item {
            key: None,
            id: self.id,
            name: self.name,
            gender: self.gender,
            item_label: self.item_label,
            currency_amount: self.currency_amount,
            quantity_label: self.quantity_label,
            created_at: DateTime::now(),
        }
    }
}

/// Update field set applied as a full overwrite.
///
/// Every mutable field is written unconditionally: an absent `name`
/// becomes null, the other four become the empty string. Fields left
/// out of a request are therefore erased, not preserved. `id`, the
/// storage key, and `created_at` are never part of the update.
#[derive(Debug, Clone, Default)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub gender: Option<String>,
    pub item_label: Option<String>,
    pub currency_amount: Option<String>,
    pub quantity_label: Option<String>,
}

impl ItemPatch {
    /// Build the `$set` document for this patch
    pub fn update_document(&self) -> Document {
        doc! {
            "$set": {
                "name": match &self.name {
                    Some(name) => Bson::String(name.clone()),
                    None => Bson::Null,
                },
                "gender": self.gender.clone().unwrap_or_default(),
                "itemLabel": self.item_label.clone().unwrap_or_default(),
                "currencyAmount": self.currency_amount.clone().unwrap_or_default(),
                "quantityLabel": self.quantity_label.clone().unwrap_or_default(),
            }
        }
    }
}
