//! Field order of table construction.

use fbgen_schema::{FieldDef, StructDef};

use crate::{Result, emit::TypeMapper};

/// Size classes visited when a table is laid out by size, widest first.
const SIZE_CLASSES: [usize; 4] = [8, 4, 2, 1];

/// The order a table's fields are written in.
///
/// The builder grows backward, so fields go last to first. Tables marked
/// `sortbysize` group fields by descending size class to minimize padding.
///
/// Construction has two phases over this order: every field produced as a
/// separate object ([`offsets`](Self::offsets)) is written first, then the
/// table is started and every slot registered ([`slots`](Self::slots)).
#[derive(Debug, Clone)]
pub struct BuildPlan<'a> {
    order: Vec<&'a FieldDef>,
}

impl<'a> BuildPlan<'a> {
    pub fn new(def: &'a StructDef) -> Self {
        let reversed = || def.fields.iter().rev().filter(|f| !f.deprecated);
        let order = if def.sortbysize {
            SIZE_CLASSES
                .iter()
                .flat_map(|&size| reversed().filter(move |f| f.ty.size_class() == size))
                .collect()
        } else {
            reversed().collect()
        };
        Self { order }
    }

    /// Fields in slot registration order.
    pub fn slots(&self) -> impl Iterator<Item = &'a FieldDef> + '_ {
        self.order.iter().copied()
    }

    /// Fields whose value is a separate object: strings, vectors, tables and
    /// union payloads. Scalars and fixed structs are written in place.
    pub fn offsets(&self, mapper: &TypeMapper) -> Result<Vec<&'a FieldDef>> {
        let mut out = Vec::new();
        for field in self.slots() {
            if !field.ty.is_scalar() && !mapper.is_fixed_struct(&field.ty)? {
                out.push(field);
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use fbgen_schema::{Namespace, Scalar, Type};

    use super::*;
    use crate::{language::JAVA, testing};

    fn names<'a>(fields: impl IntoIterator<Item = &'a FieldDef>) -> Vec<&'a str> {
        fields.into_iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn test_reverse_declaration_order() {
        let def = testing::table_def(
            "Stat",
            vec![
                ("id", Type::String),
                ("val", Type::scalar(Scalar::Long)),
                ("count", Type::scalar(Scalar::UShort)),
            ],
        );
        let plan = BuildPlan::new(&def);
        assert_eq!(names(plan.slots()), ["count", "val", "id"]);
    }

    #[test]
    fn test_sort_by_size() {
        let mut def = testing::table_def(
            "Packed",
            vec![
                ("a", Type::scalar(Scalar::UByte)),
                ("b", Type::scalar(Scalar::Double)),
                ("c", Type::String),
                ("d", Type::scalar(Scalar::Short)),
                ("e", Type::scalar(Scalar::Long)),
            ],
        );
        def.sortbysize = true;
        let plan = BuildPlan::new(&def);
        assert_eq!(names(plan.slots()), ["e", "b", "c", "d", "a"]);
    }

    #[test]
    fn test_offsets_skip_inline_values() {
        let schema = testing::monster_schema();
        let ns = Namespace::parse("Game");
        let mapper = TypeMapper::new(&JAVA, &schema, &ns);
        let monster = schema.struct_def("Game.Monster").unwrap();

        let plan = BuildPlan::new(monster);
        let offsets = plan.offsets(&mapper).unwrap();
        assert_eq!(
            names(offsets),
            ["testnested", "path", "equipped", "weapons", "inventory", "name"]
        );
        // Deprecated fields take no part in construction.
        assert!(plan.slots().all(|f| f.name != "friendly"));
        assert_eq!(plan.slots().count(), 14);
    }
}
