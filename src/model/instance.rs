//! Problem instances and their text format.

use super::types::{Container, Item};
use crate::error::{PackError, Result};
use std::path::Path;
use std::str::FromStr;

/// An immutable packing instance.
///
/// # Text format
///
/// Whitespace-separated integers: `N K`, then `N` pairs `w h` for items
/// 1..N, then `K` triples `W H cost` for containers 1..K.
///
/// ```
/// use u_binpack::model::Instance;
///
/// let instance = Instance::parse("2 1\n2 2\n4 1\n5 5 10\n").unwrap();
/// assert_eq!(instance.item_count(), 2);
/// assert_eq!(instance.container(1).cost, 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Instance {
    items: Vec<Item>,
    containers: Vec<Container>,
    /// Container IDs ascending by `(cost, ID)`.
    cost_order: Vec<usize>,
}

impl Instance {
    /// Builds an instance from `(w, h)` item pairs and `(W, H, cost)`
    /// container triples, assigning IDs 1.. in the given order.
    ///
    /// All dimensions must be positive and the summed container costs must
    /// fit in a `u64`, so that no total cost can overflow.
    pub fn new(items: &[(u64, u64)], containers: &[(u64, u64, u64)]) -> Result<Self> {
        let items: Vec<Item> = items
            .iter()
            .enumerate()
            .map(|(i, &(w, h))| Item::new(i + 1, w, h))
            .collect();
        let containers: Vec<Container> = containers
            .iter()
            .enumerate()
            .map(|(i, &(w, h, cost))| Container::new(i + 1, w, h, cost))
            .collect();

        if let Some(item) = items.iter().find(|it| it.width == 0 || it.height == 0) {
            return Err(PackError::InvalidInstance(format!(
                "item {} has a zero dimension",
                item.id
            )));
        }
        if let Some(c) = containers.iter().find(|c| c.width == 0 || c.height == 0) {
            return Err(PackError::InvalidInstance(format!(
                "container {} has a zero dimension",
                c.id
            )));
        }

        if containers
            .iter()
            .try_fold(0u64, |sum, c| sum.checked_add(c.cost))
            .is_none()
        {
            return Err(PackError::InvalidInstance(
                "summed container costs overflow u64".into(),
            ));
        }

        let mut cost_order: Vec<usize> = containers.iter().map(|c| c.id).collect();
        cost_order.sort_by_key(|&id| (containers[id - 1].cost, id));

        Ok(Self {
            items,
            containers,
            cost_order,
        })
    }

    /// Parses the whitespace-separated text format.
    pub fn parse(input: &str) -> Result<Self> {
        let mut tokens = input.split_whitespace();
        let mut next = |what: &str| -> Result<u64> {
            let token = tokens
                .next()
                .ok_or_else(|| PackError::InvalidInstance(format!("missing {what}")))?;
            token.parse::<u64>().map_err(|_| {
                PackError::InvalidInstance(format!("expected integer for {what}, got {token:?}"))
            })
        };

        let n = next("item count")? as usize;
        let k = next("container count")? as usize;

        let mut items = Vec::new();
        for i in 1..=n {
            let w = next(&format!("width of item {i}"))?;
            let h = next(&format!("height of item {i}"))?;
            items.push((w, h));
        }

        let mut containers = Vec::new();
        for c in 1..=k {
            let w = next(&format!("width of container {c}"))?;
            let h = next(&format!("height of container {c}"))?;
            let cost = next(&format!("cost of container {c}"))?;
            containers.push((w, h, cost));
        }

        if let Some(extra) = tokens.next() {
            return Err(PackError::InvalidInstance(format!(
                "unexpected trailing token {extra:?}"
            )));
        }

        Self::new(&items, &containers)
    }

    /// Reads and parses an instance file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn containers(&self) -> &[Container] {
        &self.containers
    }

    /// Returns the item with the given 1-based ID.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not in `1..=item_count()`.
    pub fn item(&self, id: usize) -> &Item {
        &self.items[id - 1]
    }

    /// Returns the container with the given 1-based ID.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not in `1..=container_count()`.
    pub fn container(&self, id: usize) -> &Container {
        &self.containers[id - 1]
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn container_count(&self) -> usize {
        self.containers.len()
    }

    /// Container IDs ascending by `(cost, ID)`; fixed for the instance.
    pub fn cost_order(&self) -> &[usize] {
        &self.cost_order
    }
}

impl FromStr for Instance {
    type Err = PackError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let instance = Instance::parse("2 2\n3 4\n1 2\n10 10 7\n5 5 3\n").unwrap();
        assert_eq!(instance.item_count(), 2);
        assert_eq!(instance.container_count(), 2);
        assert_eq!(instance.item(1), &Item::new(1, 3, 4));
        assert_eq!(instance.item(2), &Item::new(2, 1, 2));
        assert_eq!(instance.container(2), &Container::new(2, 5, 5, 3));
    }

    #[test]
    fn test_cost_order_breaks_ties_by_id() {
        let instance =
            Instance::new(&[(1, 1)], &[(5, 5, 10), (5, 5, 5), (3, 3, 10), (2, 2, 5)]).unwrap();
        assert_eq!(instance.cost_order(), &[2, 4, 1, 3]);
    }

    #[test]
    fn test_parse_missing_token() {
        let err = Instance::parse("2 1\n3 4\n").unwrap_err();
        assert!(matches!(err, PackError::InvalidInstance(_)));
    }

    #[test]
    fn test_parse_non_integer() {
        let err = Instance::parse("1 1\n3 x\n5 5 1").unwrap_err();
        assert!(err.to_string().contains("\"x\""), "got: {err}");
    }

    #[test]
    fn test_parse_trailing_tokens() {
        assert!(Instance::parse("1 1 2 2 5 5 1 9").is_err());
    }

    #[test]
    fn test_zero_dimension_rejected() {
        assert!(Instance::new(&[(0, 2)], &[(5, 5, 1)]).is_err());
        assert!(Instance::new(&[(2, 2)], &[(5, 0, 1)]).is_err());
    }

    #[test]
    fn test_parse_count_exceeds_tokens() {
        let err = Instance::parse("18446744073709551615 0").unwrap_err();
        assert!(err.to_string().contains("missing"), "got: {err}");

        let err = Instance::parse("1000000000 1 2 2").unwrap_err();
        assert!(matches!(err, PackError::InvalidInstance(_)));
    }

    #[test]
    fn test_cost_sum_overflow_rejected() {
        let err = Instance::new(&[(1, 1)], &[(2, 2, u64::MAX), (2, 2, 1)]).unwrap_err();
        assert!(matches!(err, PackError::InvalidInstance(_)));
        assert!(Instance::new(&[(1, 1)], &[(2, 2, u64::MAX - 1), (2, 2, 1)]).is_ok());
    }

    #[test]
    fn test_from_str() {
        let instance: Instance = "0 1 4 4 2".parse().unwrap();
        assert_eq!(instance.item_count(), 0);
        assert_eq!(instance.cost_order(), &[1]);
    }
}
