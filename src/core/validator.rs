use crate::domain::model::{
    as_integer, is_out_of_range_integer, DrawRequest, ManualWinner, Placement, ValidatedDraw,
};
use crate::utils::error::{DrawError, Result};
use std::collections::HashSet;

/// Checks a draw request before any participant is read.
///
/// Rules run in a fixed order and the first violation is returned:
/// winner count, manual overflow, manual integers, manual duplicates.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestValidator {
    placement: Placement,
}

impl RequestValidator {
    pub fn new(placement: Placement) -> Self {
        Self { placement }
    }

    pub fn validate(&self, request: &DrawRequest) -> Result<ValidatedDraw> {
        if is_out_of_range_integer(&request.requested_winner_count) {
            return Err(DrawError::CountOutOfRange {
                value: request.requested_winner_count.to_string(),
            });
        }

        let requested = as_integer(&request.requested_winner_count)
            .filter(|count| *count > 0)
            .ok_or_else(|| DrawError::InvalidCount {
                value: request.requested_winner_count.to_string(),
            })? as u64;

        // Unset and null slots are not pins.
        let defined: Vec<(usize, &serde_json::Value)> = request
            .manual_positions
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| match slot {
                Some(value) if !value.is_null() => Some((index + 1, value)),
                _ => None,
            })
            .collect();

        if defined.len() as u64 > requested {
            return Err(DrawError::ManualOverflow {
                manual: defined.len(),
                requested,
            });
        }

        if self.placement == Placement::Pinned {
            if let Some((position, _)) = defined.iter().find(|(pos, _)| *pos as u64 > requested) {
                return Err(DrawError::ManualSlotOutOfRange {
                    position: *position,
                    requested,
                });
            }
        }

        let mut manual_winners = Vec::with_capacity(defined.len());
        for (position, value) in &defined {
            if is_out_of_range_integer(value) {
                return Err(DrawError::ManualOutOfRange {
                    position: *position,
                    value: value.to_string(),
                });
            }
            let value = as_integer(value).ok_or_else(|| DrawError::ManualNotInteger {
                position: *position,
                value: value.to_string(),
            })?;
            manual_winners.push(ManualWinner {
                position: *position,
                value,
            });
        }

        let mut seen = HashSet::with_capacity(manual_winners.len());
        for manual in &manual_winners {
            if !seen.insert(manual.value) {
                return Err(DrawError::ManualDuplicate {
                    value: manual.value,
                });
            }
        }

        let requested_winner_count = requested as usize;
        let remaining_slots = requested_winner_count - manual_winners.len();

        tracing::debug!(
            "Validated draw: {} winners requested, {} manual, {} to draw",
            requested_winner_count,
            manual_winners.len(),
            remaining_slots
        );

        Ok(ValidatedDraw {
            requested_winner_count,
            manual_winners,
            remaining_slots,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ErrorKind;
    use serde_json::json;

    fn validate(request: &DrawRequest) -> Result<ValidatedDraw> {
        RequestValidator::default().validate(request)
    }

    #[test]
    fn test_no_manual_positions() {
        let draw = validate(&DrawRequest::new(3)).unwrap();
        assert_eq!(draw.requested_winner_count, 3);
        assert!(draw.manual_winners.is_empty());
        assert_eq!(draw.remaining_slots, 3);
    }

    #[test]
    fn test_manual_values_keep_position_order() {
        let request = DrawRequest::new(4)
            .with_manual(1, 99)
            .with_manual(3, 12);
        let draw = validate(&request).unwrap();
        assert_eq!(draw.manual_values(), vec![99, 12]);
        assert_eq!(draw.manual_winners[1].position, 3);
        assert_eq!(draw.remaining_slots, 2);
    }

    #[test]
    fn test_all_slots_manual_leaves_nothing_to_draw() {
        let request = DrawRequest::new(2).with_manual(1, 1).with_manual(2, 2);
        assert_eq!(validate(&request).unwrap().remaining_slots, 0);
    }

    #[test]
    fn test_invalid_counts() {
        for count in [json!(0), json!(-3), json!(2.5), json!("3"), json!(null)] {
            let request = DrawRequest {
                requested_winner_count: count.clone(),
                manual_positions: vec![],
            };
            let err = validate(&request).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidCount, "count {}", count);
        }
    }

    #[test]
    fn test_integral_float_count_is_accepted() {
        let request = DrawRequest {
            requested_winner_count: json!(2.0),
            manual_positions: vec![],
        };
        assert_eq!(validate(&request).unwrap().requested_winner_count, 2);
    }

    #[test]
    fn test_manual_overflow_reports_both_numbers() {
        let request = DrawRequest::new(1).with_manual(1, 5).with_manual(2, 6);
        let err = validate(&request).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ManualOverflow);
        assert_eq!(
            err.to_string(),
            "2 manual winners defined, but only 1 winners requested"
        );
    }

    #[test]
    fn test_overflow_wins_over_non_integer() {
        let request = DrawRequest::new(1)
            .with_manual(1, "x")
            .with_manual(2, 6);
        assert_eq!(
            validate(&request).unwrap_err().kind(),
            ErrorKind::ManualOverflow
        );
    }

    #[test]
    fn test_manual_not_integer() {
        let request = DrawRequest::new(3).with_manual(2, 4.5);
        let err = validate(&request).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ManualNotInteger);
        assert!(err.to_string().contains("position 2"));
    }

    #[test]
    fn test_huge_manual_value_reports_range() {
        let request = DrawRequest::new(2).with_manual(1, 18446744073709551615u64);
        let err = validate(&request).unwrap_err();
        assert!(matches!(err, DrawError::ManualOutOfRange { position: 1, .. }));
        assert!(err.to_string().contains("outside the supported range"));
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_huge_count_reports_range() {
        let request = DrawRequest {
            requested_winner_count: json!(18446744073709551615u64),
            manual_positions: vec![],
        };
        let err = validate(&request).unwrap_err();
        assert!(matches!(err, DrawError::CountOutOfRange { .. }));
        assert_eq!(err.kind(), ErrorKind::InvalidCount);
    }

    #[test]
    fn test_non_integer_wins_over_duplicate() {
        let request = DrawRequest::new(3)
            .with_manual(1, 5)
            .with_manual(2, 5)
            .with_manual(3, "seven");
        assert_eq!(
            validate(&request).unwrap_err().kind(),
            ErrorKind::ManualNotInteger
        );
    }

    #[test]
    fn test_manual_duplicate() {
        let request = DrawRequest::new(2).with_manual(1, 5).with_manual(2, 5);
        let err = validate(&request).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ManualDuplicate);
    }

    #[test]
    fn test_null_slots_are_unset() {
        let request = DrawRequest {
            requested_winner_count: json!(1),
            manual_positions: vec![Some(json!(null)), None, Some(json!(8))],
        };
        let draw = validate(&request).unwrap();
        assert_eq!(draw.manual_values(), vec![8]);
        assert_eq!(draw.remaining_slots, 0);
    }

    #[test]
    fn test_compact_ignores_slot_index_beyond_count() {
        let request = DrawRequest::new(2).with_manual(5, 7);
        assert!(validate(&request).is_ok());
    }

    #[test]
    fn test_pinned_rejects_slot_beyond_count() {
        let request = DrawRequest::new(2).with_manual(5, 7);
        let err = RequestValidator::new(Placement::Pinned)
            .validate(&request)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ManualOverflow);
        assert!(err.to_string().contains("position 5"));
    }

    #[test]
    fn test_revalidating_normalized_request_is_stable() {
        let validator = RequestValidator::new(Placement::Pinned);
        let request = DrawRequest::new(6)
            .with_manual(2, 40)
            .with_manual(4, 41);
        let first = validator.validate(&request).unwrap();
        let second = validator.validate(&first.to_request()).unwrap();
        assert_eq!(first, second);
    }
}
