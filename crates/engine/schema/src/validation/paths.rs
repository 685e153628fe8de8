use std::collections::BTreeSet;

use crate::{ObjectType, Schema};

/// All dotted paths from `root` to a scalar field which can be sorted or filtered on. List and aggregate
/// fields are skipped, and an object type already on the current path is not entered twice.
pub(super) fn scalar_field_paths(schema: &Schema, root: &ObjectType) -> BTreeSet<String> {
    let mut paths = BTreeSet::new();
    let mut stack = vec![root.name.as_str()];
    collect(schema, root, "", &mut stack, &mut paths);
    paths
}

fn collect<'s>(
    schema: &'s Schema,
    object_type: &'s ObjectType,
    prefix: &str,
    stack: &mut Vec<&'s str>,
    paths: &mut BTreeSet<String>,
) {
    for field in object_type.fields() {
        if field.is_list() || field.is_aggregate() {
            continue;
        }

        let path = format!("{prefix}{}", field.name);
        match schema.target_type(field) {
            Some(target) => {
                if stack.contains(&target.name.as_str()) {
                    continue;
                }
                stack.push(&target.name);
                collect(schema, target, &format!("{path}."), stack, paths);
                stack.pop();
            }
            None => {
                paths.insert(path);
            }
        }
    }
}
