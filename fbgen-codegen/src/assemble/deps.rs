use std::path::Path;

/// Dependency rule for build tools: every output, a colon, then every
/// schema file the outputs were generated from.
///
/// ```
/// use std::path::PathBuf;
///
/// use fbgen_codegen::assemble::make_rule;
///
/// let outputs = [PathBuf::from("out/Game/Monster.java"), PathBuf::from("out/Game/Vec3.java")];
/// let includes = ["monster.fbs".to_string()];
/// assert_eq!(
///     make_rule(&outputs, &includes),
///     "out/Game/Monster.java out/Game/Vec3.java: monster.fbs"
/// );
/// ```
pub fn make_rule<P: AsRef<Path>>(outputs: &[P], includes: &[String]) -> String {
    let mut rule = outputs
        .iter()
        .map(|path| path.as_ref().display().to_string())
        .collect::<Vec<_>>()
        .join(" ");
    rule.push(':');
    for include in includes {
        rule.push(' ');
        rule.push_str(include);
    }
    rule
}
