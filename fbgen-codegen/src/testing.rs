//! Sample schemas for backend tests.
//!
//! This module is only available when the `testing` feature is enabled
//! or during tests.

use fbgen_schema::{
    Attributes, EnumDef, EnumVal, FieldDef, Namespace, Scalar, Schema, StructDef, Type,
};
use tempfile::TempDir;

/// A scratch output directory removed on drop.
pub fn scratch_dir() -> std::io::Result<TempDir> {
    tempfile::Builder::new().prefix("fbgen-").tempdir()
}

pub fn enum_def(name: &str, underlying: Scalar, values: &[(&str, i128)]) -> EnumDef {
    EnumDef {
        name: name.to_string(),
        namespace: Namespace::parse("Game"),
        doc: Vec::new(),
        underlying,
        is_union: false,
        attributes: Attributes::default(),
        values: values
            .iter()
            .map(|(name, value)| EnumVal::new(*name, *value))
            .collect(),
    }
}

pub fn struct_def(name: &str, bytesize: usize, minalign: usize, fields: Vec<FieldDef>) -> StructDef {
    StructDef {
        name: name.to_string(),
        namespace: Namespace::parse("Game"),
        doc: Vec::new(),
        fixed: true,
        bytesize,
        minalign,
        sortbysize: false,
        attributes: Attributes::default(),
        fields,
    }
}

/// Table fields get vtable slots 4, 6, 8, ... in declaration order.
pub fn table_def(name: &str, fields: Vec<(&str, Type)>) -> StructDef {
    StructDef {
        name: name.to_string(),
        namespace: Namespace::parse("Game"),
        doc: Vec::new(),
        fixed: false,
        bytesize: 0,
        minalign: 1,
        sortbysize: false,
        attributes: Attributes::default(),
        fields: fields
            .into_iter()
            .enumerate()
            .map(|(i, (name, ty))| FieldDef::new(name, ty, slot(i)))
            .collect(),
    }
}

pub fn slot(index: usize) -> u16 {
    4 + 2 * index as u16
}

fn vec3() -> StructDef {
    struct_def(
        "Vec3",
        12,
        4,
        vec![
            FieldDef::new("x", Type::scalar(Scalar::Float), 0),
            FieldDef::new("y", Type::scalar(Scalar::Float), 4),
            FieldDef::new("z", Type::scalar(Scalar::Float), 8),
        ],
    )
}

fn weapon() -> StructDef {
    let mut def = table_def(
        "Weapon",
        vec![
            ("name", Type::String),
            ("damage", Type::scalar(Scalar::Short)),
        ],
    );
    def.fields[0].key = true;
    def
}

/// `Game.Monster`, the root table, and everything it references.
///
/// | slot | field | type |
/// |---|---|---|
/// | 4 | pos | Vec3 |
/// | 6 | mana | short = 150 |
/// | 8 | hp | short = 100 |
/// | 10 | name | string, required, key |
/// | 12 | friendly | bool, deprecated |
/// | 14 | inventory | \[ubyte\] |
/// | 16 | color | Color = Blue |
/// | 18 | weapons | \[Weapon\] |
/// | 20 | equipped_type | Equipment discriminant |
/// | 22 | equipped | Equipment |
/// | 24 | path | \[Vec3\] |
/// | 26 | testnested | \[ubyte\], nested Monster |
/// | 28 | big | ulong = u64::MAX |
/// | 30 | ratio | float = 3 |
/// | 32 | flags | uint = 7 |
pub fn monster_schema() -> Schema {
    let mut schema = Schema::default();
    schema.file_name = "monster".into();
    schema.current_namespace = Namespace::parse("Game");
    schema.root_type = Some("Game.Monster".into());
    schema.file_identifier = Some("MONS".into());
    schema.included_files = vec!["monster.fbs".into(), "weapon.fbs".into()];
    schema.root_file = Some("monster.fbs".into());

    schema.add_enum(enum_def(
        "Color",
        Scalar::Byte,
        &[("Red", 0), ("Green", 1), ("Blue", 2)],
    ));
    let mut equipment = enum_def("Equipment", Scalar::UType, &[("NONE", 0), ("Weapon", 1)]);
    equipment.is_union = true;
    equipment.values[1].union_type = Some(Type::structure("Game.Weapon"));
    schema.add_enum(equipment);

    schema.add_struct(vec3());
    schema.add_struct(weapon());

    let mut monster = table_def(
        "Monster",
        vec![
            ("pos", Type::structure("Game.Vec3")),
            ("mana", Type::scalar(Scalar::Short)),
            ("hp", Type::scalar(Scalar::Short)),
            ("name", Type::String),
            ("friendly", Type::scalar(Scalar::Bool)),
            ("inventory", Type::vector(Type::scalar(Scalar::UByte))),
            ("color", Type::enumeration(Scalar::Byte, "Game.Color")),
            ("weapons", Type::vector(Type::structure("Game.Weapon"))),
            (
                "equipped_type",
                Type::enumeration(Scalar::UType, "Game.Equipment"),
            ),
            ("equipped", Type::union("Game.Equipment")),
            ("path", Type::vector(Type::structure("Game.Vec3"))),
            ("testnested", Type::vector(Type::scalar(Scalar::UByte))),
            ("big", Type::scalar(Scalar::ULong)),
            ("ratio", Type::scalar(Scalar::Float)),
            ("flags", Type::scalar(Scalar::UInt)),
        ],
    );
    monster.fields[1].default = "150".into();
    monster.fields[2].default = "100".into();
    monster.fields[3].required = true;
    monster.fields[3].key = true;
    monster.fields[4].deprecated = true;
    monster.fields[6].default = "2".into();
    monster.fields[11].nested_flatbuffer = Some("Game.Monster".into());
    monster.fields[12].default = "18446744073709551615".into();
    monster.fields[13].default = "3".into();
    monster.fields[14].default = "7".into();
    monster.doc = vec!["A monster.".into()];
    schema.add_struct(monster);
    schema
}

/// Fixed structs with nested structs, fixed arrays and padding.
///
/// `Outer { c: ubyte (3 bytes padding), inner: [Inner:2] }` where
/// `Inner { a: [int:2], b: ushort (2 bytes padding) }`.
pub fn arrays_schema() -> Schema {
    let mut schema = Schema::default();
    schema.file_name = "arrays".into();
    schema.current_namespace = Namespace::parse("Game");
    schema.add_struct(struct_def(
        "Inner",
        12,
        4,
        vec![
            FieldDef::new("a", Type::array(Type::scalar(Scalar::Int), 2), 0),
            FieldDef::new("b", Type::scalar(Scalar::UShort), 8).with_padding(2),
        ],
    ));
    schema.add_struct(struct_def(
        "Outer",
        28,
        4,
        vec![
            FieldDef::new("c", Type::scalar(Scalar::UByte), 0).with_padding(3),
            FieldDef::new("inner", Type::array(Type::structure("Game.Inner"), 2), 4),
        ],
    ));
    schema
}
