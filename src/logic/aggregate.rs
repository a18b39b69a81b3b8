// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Collection validation with field paths that point at the offending element.
//!
//! Each element that can validate itself reports its own violations; those are
//! rebased under `property[index]` so `files[2].checksum` binds to the exact
//! input. Shared context (sibling data needed by cross-field rules) is handed
//! down one level to every element.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::ContractError;
use crate::models::ValidationResult;

/// A value that can report its own field-scoped violations.
pub trait SelfValidatable {
    fn validate(&self, context: &ValidationContext) -> Vec<ValidationResult>;
}

/// Shared state passed into self-validation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ValidationContext {
    member_name: Option<String>,
    items: BTreeMap<String, Value>,
}

impl ValidationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a shared item, replacing any previous value under `key`.
    pub fn with_item(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.items.insert(key.into(), value.into());
        self
    }

    pub fn item(&self, key: &str) -> Option<&Value> {
        self.items.get(key)
    }

    /// Path of the element being validated, when validating inside a collection.
    pub fn member_name(&self) -> Option<&str> {
        self.member_name.as_deref()
    }

    /// Context for one element: same shared items, element path as member name.
    pub fn nested(&self, member_name: impl Into<String>) -> Self {
        Self {
            member_name: Some(member_name.into()),
            items: self.items.clone(),
        }
    }
}

/// Validates an optional collection of optional elements.
#[derive(Clone, Debug)]
pub struct CollectionValidator<'a> {
    property: String,
    non_empty: bool,
    parent: Option<&'a ValidationContext>,
}

impl<'a> CollectionValidator<'a> {
    /// Fails with [`ContractError::EmptyPropertyName`] when `property` is blank.
    pub fn new(property: impl Into<String>) -> Result<Self, ContractError> {
        let property = property.into();
        if property.trim().is_empty() {
            return Err(ContractError::EmptyPropertyName);
        }
        Ok(Self {
            property,
            non_empty: false,
            parent: None,
        })
    }

    /// Also report an empty collection.
    pub fn non_empty(mut self) -> Self {
        self.non_empty = true;
        self
    }

    /// Share `parent`'s items with every element's validation.
    pub fn with_parent(mut self, parent: &'a ValidationContext) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn validate<T: SelfValidatable>(&self, items: Option<&[Option<T>]>) -> Vec<ValidationResult> {
        let property = &self.property;
        let Some(items) = items else {
            return vec![ValidationResult::new(
                format!("{property} is required."),
                property.as_str(),
            )];
        };

        let mut results = Vec::new();
        if self.non_empty && items.is_empty() {
            results.push(ValidationResult::new(
                format!("{property} must contain at least one item."),
                property.as_str(),
            ));
        }

        let root = ValidationContext::new();
        let parent = self.parent.unwrap_or(&root);
        for (index, item) in items.iter().enumerate() {
            let path = format!("{property}[{index}]");
            match item {
                None => results.push(ValidationResult::new(format!("{path} is null"), path)),
                Some(item) => {
                    let context = parent.nested(path.as_str());
                    results.extend(
                        item.validate(&context)
                            .into_iter()
                            .map(|result| result.prefixed(&path)),
                    );
                }
            }
        }
        results
    }
}

/// Validate `items` under `property` with default options.
pub fn validate_collection<T: SelfValidatable>(
    items: Option<&[Option<T>]>,
    property: &str,
) -> Result<Vec<ValidationResult>, ContractError> {
    Ok(CollectionValidator::new(property)?.validate(items))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Party {
        name: &'static str,
    }

    impl SelfValidatable for Party {
        fn validate(&self, context: &ValidationContext) -> Vec<ValidationResult> {
            let mut results = Vec::new();
            if self.name.is_empty() {
                results.push(ValidationResult::new("Name is required.", "name"));
            }
            let limit = context
                .item("maxNameLength")
                .and_then(Value::as_u64)
                .unwrap_or(u64::MAX);
            if self.name.len() as u64 > limit {
                results.push(ValidationResult::without_field("Party name is too long."));
            }
            results
        }
    }

    fn party(name: &'static str) -> Option<Party> {
        Some(Party { name })
    }

    #[test]
    fn missing_collection_is_reported_once() {
        let results = validate_collection::<Party>(None, "parties").unwrap();
        assert_eq!(
            results,
            vec![ValidationResult::new("parties is required.", "parties")]
        );
    }

    // One null element among valid ones yields exactly one result.
    #[test]
    fn null_element_is_reported_by_index() {
        let items = [party("Smith"), party("Jones"), None, party("Doe")];
        let results = validate_collection(Some(&items[..]), "items").unwrap();
        assert_eq!(
            results,
            vec![ValidationResult::new("items[2] is null", "items[2]")]
        );
    }

    #[test]
    fn element_results_are_rebased_under_the_element_path() {
        let items = [party("Smith"), party("")];
        let results = validate_collection(Some(&items[..]), "parties").unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].field_path, vec!["parties[1].name"]);
        assert_eq!(results[0].message, "Name is required.");
    }

    #[test]
    fn parent_items_reach_every_element() {
        let parent = ValidationContext::new().with_item("maxNameLength", 4);
        let items = [party("Doe"), party("Jones")];
        let results = CollectionValidator::new("parties")
            .unwrap()
            .with_parent(&parent)
            .validate(Some(&items[..]));
        assert_eq!(
            results,
            vec![ValidationResult::new("Party name is too long.", "parties[1]")]
        );
    }

    #[test]
    fn non_empty_mode_rejects_empty_collections() {
        let empty: [Option<Party>; 0] = [];
        let validator = CollectionValidator::new("parties").unwrap();
        assert!(validator.validate(Some(&empty[..])).is_empty());
        assert_eq!(
            validator.non_empty().validate(Some(&empty[..]))[0].message,
            "parties must contain at least one item."
        );
    }

    #[test]
    fn blank_property_name_is_a_contract_error() {
        assert_eq!(
            CollectionValidator::new(" ").unwrap_err(),
            ContractError::EmptyPropertyName
        );
        assert!(validate_collection::<Party>(None, "").is_err());
    }

    #[test]
    fn nested_context_carries_member_name_and_items() {
        let parent = ValidationContext::new().with_item("k", "v");
        let nested = parent.nested("files[0]");
        assert_eq!(nested.member_name(), Some("files[0]"));
        assert_eq!(nested.item("k"), Some(&Value::from("v")));
        assert_eq!(parent.member_name(), None);
    }
}
