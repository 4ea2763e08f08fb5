//! Snapshot tests for Java code generation.
//!
//! Small files are pinned with inline snapshots; the sample monster schema
//! is checked member by member. Run `cargo insta review` to update
//! snapshots when making intentional changes.

use std::fs;

use fbgen_codegen::{GenerateOptions, testing};
use fbgen_codegen_java::{Generator, LanguageCodegen};
use fbgen_schema::Schema;

const COLORS: &str = r#"
{
  "file_name": "colors",
  "current_namespace": ["Game"],
  "enums": [
    {
      "name": "Color",
      "namespace": ["Game"],
      "underlying": "byte",
      "values": [
        { "name": "Red", "value": 0 },
        { "name": "Green", "value": 1 },
        { "name": "Blue", "value": 2 }
      ]
    }
  ]
}
"#;

/// Generate code for a schema and return files sorted by path for deterministic snapshots.
fn generate_files(schema: &Schema, options: &GenerateOptions) -> Vec<(String, String)> {
    let generator = Generator::new(schema, options);
    let files = generator.preview().expect("generation failed");

    let mut result: Vec<(String, String)> =
        files.into_iter().map(|f| (f.path, f.content)).collect();
    result.sort_by(|a, b| a.0.cmp(&b.0));
    result
}

/// Get a specific file from the generated output.
fn get_file<'a>(files: &'a [(String, String)], path: &str) -> Option<&'a str> {
    files
        .iter()
        .find(|(p, _)| p == path)
        .map(|(_, c)| c.as_str())
}

fn monster_files() -> Vec<(String, String)> {
    generate_files(&testing::monster_schema(), &GenerateOptions::default())
}

/// Assert that every needle occurs in `text`, in the given order.
fn assert_in_order(text: &str, needles: &[&str]) {
    let mut from = 0;
    for needle in needles {
        let found = text[from..]
            .find(needle)
            .unwrap_or_else(|| panic!("`{needle}` missing or out of order"));
        from += found + needle.len();
    }
}

#[test]
fn test_enum_constants_class() {
    let schema = Schema::from_json(COLORS, "colors.json").expect("Failed to parse schema");
    let files = generate_files(&schema, &GenerateOptions::default());
    assert_eq!(files.len(), 1);

    let color = get_file(&files, "Game/Color.java").expect("Color.java not found");
    insta::assert_snapshot!(color, @r#"
    // automatically generated by fbgen, do not modify

    package Game;

    @SuppressWarnings("unused")
    public final class Color {
      private Color() { }
      public static final byte Red = 0;
      public static final byte Green = 1;
      public static final byte Blue = 2;

      public static final String[] names = { "Red", "Green", "Blue" };

      public static String name(int e) { return names[e]; }
    }
    "#);
}

#[test]
fn test_sparse_enum_has_no_names() {
    let schema = Schema::from_json(
        &COLORS.replace(r#""value": 2"#, r#""value": 20"#),
        "colors.json",
    )
    .expect("Failed to parse schema");
    let files = generate_files(&schema, &GenerateOptions::default());
    let color = get_file(&files, "Game/Color.java").expect("Color.java not found");
    assert!(color.contains("public static final byte Blue = 20;"));
    assert!(!color.contains("names"));
}

#[test]
fn test_one_file_per_type() {
    let files = monster_files();
    let paths: Vec<&str> = files.iter().map(|(p, _)| p.as_str()).collect();
    assert_eq!(
        paths,
        [
            "Game/Color.java",
            "Game/Equipment.java",
            "Game/Monster.java",
            "Game/Vec3.java",
            "Game/Weapon.java",
        ]
    );
}

#[test]
fn test_table_prologue() {
    let files = monster_files();
    let monster = get_file(&files, "Game/Monster.java").expect("Monster.java not found");
    assert_in_order(
        monster,
        &[
            "import com.google.flatbuffers.*;",
            "@SuppressWarnings(\"unused\")",
            "public final class Monster extends Table {",
            "public static void ValidateVersion() { Constants.FLATBUFFERS_1_11_1(); }",
            "public static Monster getRootAsMonster(ByteBuffer _bb) { return getRootAsMonster(_bb, new Monster()); }",
            "_bb.order(ByteOrder.LITTLE_ENDIAN);",
            "public static boolean MonsterBufferHasIdentifier(ByteBuffer _bb) { return __has_identifier(_bb, \"MONS\"); }",
            "public void __init(int _i, ByteBuffer _bb) { __reset(_i, _bb); }",
            "public Monster __assign(int _i, ByteBuffer _bb) { __init(_i, _bb); return this; }",
        ],
    );
}

#[test]
fn test_scalar_accessors() {
    let files = monster_files();
    let monster = get_file(&files, "Game/Monster.java").expect("Monster.java not found");
    assert!(monster.contains(
        "public short hp() { int o = __offset(8); return o != 0 ? bb.getShort(o + bb_pos) : 100; }"
    ));
    // Deprecated fields have no accessor but keep their slot.
    assert!(!monster.contains("friendly()"));
    assert!(!monster.contains("mutateHp"));

    let vec3 = get_file(&files, "Game/Vec3.java").expect("Vec3.java not found");
    assert!(vec3.contains("public final class Vec3 extends Struct {"));
    assert!(vec3.contains("public float y() { return bb.getFloat(bb_pos + 4); }"));
}

#[test]
fn test_builders_follow_accessors() {
    let files = monster_files();
    let monster = get_file(&files, "Game/Monster.java").expect("Monster.java not found");
    assert_in_order(
        monster,
        &[
            "public short hp()",
            "public static void startMonster(FlatBufferBuilder builder)",
            "public static void addHp(FlatBufferBuilder builder",
            "public static int endMonster(FlatBufferBuilder builder)",
            "public static void finishMonsterBuffer(FlatBufferBuilder builder",
            "public static void finishSizePrefixedMonsterBuffer(FlatBufferBuilder builder",
        ],
    );
    // A table with an inline struct field has no one-call constructor.
    assert!(!monster.contains("createMonster("));

    let weapon = get_file(&files, "Game/Weapon.java").expect("Weapon.java not found");
    assert!(weapon.contains("public static int createWeapon(FlatBufferBuilder builder"));
    assert!(!weapon.contains("finishWeaponBuffer"));
}

#[test]
fn test_keyed_table_lookup() {
    let files = monster_files();
    let weapon = get_file(&files, "Game/Weapon.java").expect("Weapon.java not found");
    assert_in_order(
        weapon,
        &[
            "@Override",
            "protected int keysCompare(Integer o1, Integer o2, ByteBuffer _bb)",
            "createSortedVectorOfWeapon",
            "__lookup_by_key",
        ],
    );
    // Java has no deep clone.
    assert!(!weapon.contains("clone("));

    let monster = get_file(&files, "Game/Monster.java").expect("Monster.java not found");
    assert!(monster.contains("weaponsByKey(String key)"));
}

#[test]
fn test_mutable_buffer_adds_mutators() {
    let options = GenerateOptions {
        mutable_buffer: true,
        ..GenerateOptions::default()
    };
    let files = generate_files(&testing::monster_schema(), &options);
    let vec3 = get_file(&files, "Game/Vec3.java").expect("Vec3.java not found");
    assert!(vec3.contains("mutateX(float x)"));
    let monster = get_file(&files, "Game/Monster.java").expect("Monster.java not found");
    assert!(monster.contains("public boolean mutateFlags(long flags)"));
}

#[test]
fn test_nullable_annotations() {
    let options = GenerateOptions {
        gen_nullable: true,
        gen_generated: true,
        ..GenerateOptions::default()
    };
    let files = generate_files(&testing::monster_schema(), &options);
    let weapon = get_file(&files, "Game/Weapon.java").expect("Weapon.java not found");
    assert_in_order(
        weapon,
        &[
            "import javax.annotation.Nullable;",
            "@SuppressWarnings(\"unused\")",
            "@javax.annotation.Generated(value=\"fbgen\")",
            "public @Nullable String name()",
        ],
    );
    // Required strings are never null.
    let monster = get_file(&files, "Game/Monster.java").expect("Monster.java not found");
    assert!(monster.contains("public String name()"));
}

#[test]
fn test_one_file_mode() {
    let options = GenerateOptions {
        one_file: true,
        ..GenerateOptions::default()
    };
    let files = generate_files(&testing::monster_schema(), &options);
    assert_eq!(files.len(), 1);
    let (path, text) = &files[0];
    assert_eq!(path, "Game/monster.java");
    assert_eq!(text.matches("package Game;").count(), 1);
    assert_in_order(
        text,
        &[
            "class Color",
            "class Equipment",
            "class Vec3",
            "class Weapon",
            "class Monster",
        ],
    );
}

#[test]
fn test_generate_writes_and_skips_unchanged() {
    let schema = testing::monster_schema();
    let options = GenerateOptions::default();
    let generator = Generator::new(&schema, &options);
    let dir = tempfile::tempdir().unwrap();

    let first = generator.generate(dir.path()).unwrap();
    assert_eq!(first.written.len(), 5);
    let path = dir.path().join("Game").join("Monster.java");
    let content = fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("// automatically generated by fbgen, do not modify\n"));

    let second = generator.generate(dir.path()).unwrap();
    assert!(second.written.is_empty());
    assert_eq!(second.unchanged.len(), 5);
}

#[test]
fn test_make_rule() {
    let schema = testing::monster_schema();
    let options = GenerateOptions::default();
    let generator = Generator::new(&schema, &options);
    let out = std::path::Path::new("gen");
    let rule = generator.make_rule(out);
    let (outputs, inputs) = rule.split_once(": ").unwrap();
    assert_eq!(outputs.split(' ').count(), 5);
    assert_eq!(inputs, "monster.fbs weapon.fbs");
    assert_eq!(generator.language(), "java");
    assert_eq!(generator.file_extension(), "java");
}
