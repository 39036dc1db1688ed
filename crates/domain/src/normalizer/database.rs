use crate::{FlatField, PlanningFormData};

/// Flattens a planning form into storage rows, one per answered key.
///
/// Missing keys, explicit nulls and empty strings are not stored; `false`
/// and `0` are.
#[must_use]
pub fn convert_planning_data_to_db(form: &PlanningFormData) -> Vec<FlatField> {
    form.entries()
        .filter_map(|(key, value)| {
            let value = value?;
            (!value.is_empty_text()).then(|| FlatField::new(key, value.clone()))
        })
        .collect()
}

/// Rebuilds a planning form from storage rows.
///
/// Keys are assigned as stored without coercion; the last row for a key wins.
#[must_use]
pub fn convert_planning_data_from_db(rows: &[FlatField]) -> PlanningFormData {
    let mut form = PlanningFormData::new();

    for row in rows {
        let (Some(key), Some(value)) = (row.field_name.as_deref(), row.field_value.as_ref()) else {
            continue;
        };
        form.set(key, value.clone());
    }

    form
}
