//! Display-order planning for ordered collections (hero slides, team members,
//! partners, gallery photos).
//!
//! Positions inside a collection are dense integers starting at
//! [`ORDER_ORIGIN`]. A reorder request is a permutation of the ids currently in
//! the collection; [`plan_reorder`] checks the permutation and produces the new
//! positions. Persisting them atomically is the repository layer's job.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, FieldErrors};
use crate::types::{id_list_string, id_string, DbId};

/// First position in every ordered collection.
pub const ORDER_ORIGIN: i32 = 0;

/// Upper bound on the number of ids accepted in one reorder request.
pub const MAX_REORDER_IDS: usize = 10_000;

/// One entry of a planned (or persisted) ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    #[serde(with = "id_string")]
    pub id: DbId,
    pub display_order: i32,
}

/// Body of every `PUT .../reorder` request: the full collection in its new order.
#[derive(Debug, Clone, Deserialize)]
pub struct ReorderRequest {
    #[serde(with = "id_list_string")]
    pub ids: Vec<DbId>,
}

/// Validate `requested` against the ids currently in the collection and return
/// the dense positions it implies.
///
/// The request must contain every current id exactly once and nothing else.
/// All problems are reported together under the `ids` field.
pub fn plan_reorder(current: &[DbId], requested: &[DbId]) -> Result<Vec<Position>, CoreError> {
    if requested.is_empty() {
        return Err(CoreError::Validation(
            "Reorder list must not be empty".to_string(),
        ));
    }
    if requested.len() > MAX_REORDER_IDS {
        return Err(CoreError::Validation(format!(
            "Reorder list must contain at most {MAX_REORDER_IDS} ids"
        )));
    }

    let current_set: HashSet<DbId> = current.iter().copied().collect();
    let mut seen = HashSet::with_capacity(requested.len());
    let mut duplicates = Vec::new();
    let mut unknown = Vec::new();

    for &id in requested {
        if !seen.insert(id) {
            duplicates.push(id);
        } else if !current_set.contains(&id) {
            unknown.push(id);
        }
    }

    let missing: Vec<DbId> = current
        .iter()
        .copied()
        .filter(|id| !seen.contains(id))
        .collect();

    let mut errors = FieldErrors::new();
    if !duplicates.is_empty() {
        errors.add("ids", format!("duplicate ids: {}", join_ids(&duplicates)));
    }
    if !unknown.is_empty() {
        errors.add(
            "ids",
            format!("ids not in this collection: {}", join_ids(&unknown)),
        );
    }
    if !missing.is_empty() {
        errors.add("ids", format!("missing ids: {}", join_ids(&missing)));
    }
    errors.into_result()?;

    Ok(requested
        .iter()
        .zip(ORDER_ORIGIN..)
        .map(|(&id, display_order)| Position { id, display_order })
        .collect())
}

/// Position for an item appended to a collection whose largest position is `max`.
pub fn next_position(max: Option<i32>) -> i32 {
    max.map_or(ORDER_ORIGIN, |m| m + 1)
}

/// Whether `positions` (in any order) are exactly `ORDER_ORIGIN..ORDER_ORIGIN + len`.
pub fn is_dense(positions: &[i32]) -> bool {
    let mut sorted = positions.to_vec();
    sorted.sort_unstable();
    sorted.iter().zip(ORDER_ORIGIN..).all(|(&p, expected)| p == expected)
}

fn join_ids(ids: &[DbId]) -> String {
    ids.iter()
        .map(DbId::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn orders(plan: &[Position]) -> Vec<(DbId, i32)> {
        plan.iter().map(|p| (p.id, p.display_order)).collect()
    }

    #[test]
    fn rotating_three_slides_yields_expected_positions() {
        // A=1, B=2, C=3 currently at 0, 1, 2; requested order C, A, B.
        let plan = plan_reorder(&[1, 2, 3], &[3, 1, 2]).unwrap();
        let mut by_id = orders(&plan);
        by_id.sort();
        assert_eq!(by_id, vec![(1, 1), (2, 2), (3, 0)]);
    }

    #[test]
    fn identity_permutation_keeps_positions() {
        let plan = plan_reorder(&[10, 20, 30], &[10, 20, 30]).unwrap();
        assert_eq!(orders(&plan), vec![(10, 0), (20, 1), (30, 2)]);
    }

    #[test]
    fn every_permutation_of_four_is_dense() {
        let current = [1, 2, 3, 4];
        let mut perms = Vec::new();
        permute(&mut current.to_vec(), 0, &mut perms);
        assert_eq!(perms.len(), 24);

        for perm in perms {
            let plan = plan_reorder(&current, &perm).unwrap();
            let positions: Vec<i32> = plan.iter().map(|p| p.display_order).collect();
            assert!(is_dense(&positions));
            for (index, id) in perm.iter().enumerate() {
                let entry = plan.iter().find(|p| p.id == *id).unwrap();
                assert_eq!(entry.display_order, index as i32);
            }
        }
    }

    fn permute(items: &mut Vec<DbId>, k: usize, out: &mut Vec<Vec<DbId>>) {
        if k == items.len() {
            out.push(items.clone());
            return;
        }
        for i in k..items.len() {
            items.swap(k, i);
            permute(items, k + 1, out);
            items.swap(k, i);
        }
    }

    #[test]
    fn empty_request_is_rejected() {
        let err = plan_reorder(&[1, 2], &[]).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn partial_request_reports_missing_ids() {
        let err = plan_reorder(&[1, 2, 3], &[3, 1]).unwrap_err();
        match err {
            CoreError::InvalidFields(fields) => {
                assert_eq!(fields.0["ids"], vec!["missing ids: 2".to_string()]);
            }
            other => panic!("expected InvalidFields, got {other:?}"),
        }
    }

    #[test]
    fn foreign_and_duplicate_ids_are_reported_together() {
        let err = plan_reorder(&[1, 2], &[1, 1, 2, 99]).unwrap_err();
        match err {
            CoreError::InvalidFields(fields) => {
                let messages = &fields.0["ids"];
                assert!(messages.contains(&"duplicate ids: 1".to_string()));
                assert!(messages.contains(&"ids not in this collection: 99".to_string()));
                assert_eq!(messages.len(), 2);
            }
            other => panic!("expected InvalidFields, got {other:?}"),
        }
    }

    #[test]
    fn request_against_empty_collection_is_rejected() {
        let err = plan_reorder(&[], &[5]).unwrap_err();
        assert!(matches!(err, CoreError::InvalidFields(_)));
    }

    #[test]
    fn next_position_appends() {
        assert_eq!(next_position(None), ORDER_ORIGIN);
        assert_eq!(next_position(Some(4)), 5);
    }

    #[test]
    fn density_check() {
        assert!(is_dense(&[]));
        assert!(is_dense(&[2, 0, 1]));
        assert!(!is_dense(&[0, 2]));
        assert!(!is_dense(&[0, 0, 1]));
        assert!(!is_dense(&[1, 2]));
    }
}
