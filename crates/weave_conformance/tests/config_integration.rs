//! `weave.toml` settings flowing through a full run.

use pretty_assertions::assert_eq;
use weave_config::{load_config, CONFIG_FILE_NAME};
use weave_conformance::Host;
use weave_diagnostics::DiagnosticKind;

#[test]
fn project_config_controls_rendering() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(CONFIG_FILE_NAME),
        r#"
[emit]
indent_width = 2
artifact_suffix = ".Mixins.g.cs"
header = "// generated by weave"
reindent_members = true

[pipeline]
parallel = false
"#,
    )
    .unwrap();
    let config = load_config(dir.path()).unwrap();

    let mut host = Host::with_config(config);
    let mixin = host
        .mixin("Lib", "Counter")
        .with_member("private int _count;")
        .with_member("public void Increment()\n{\n    _count++;\n}");
    let target = host.target("App", "Clicker", &["Lib.Counter"]);
    let result = host.run(&[mixin, target]);

    assert_eq!(
        result.artifact("App.Clicker.Mixins.g.cs").unwrap(),
        "\
// generated by weave

namespace App
{
  public partial class Clicker
  {
    private int _count;

    public void Increment()
    {
      _count++;
    }
  }
}
"
    );
}

#[test]
fn duplicate_member_detection_is_opt_in() {
    let build = |host: &Host| {
        vec![
            host.mixin("M", "A").with_named_member("Id", "public int Id;"),
            host.mixin("M", "B").with_named_member("Id", "public long Id;"),
            host.target("App", "T", &["M.A", "M.B"]),
        ]
    };

    let mut quiet = Host::new();
    let result = quiet.run(&build(&quiet));
    assert!(result.diagnostics.is_empty());

    let mut strict =
        Host::with_config_str("[merge]\ndetect_duplicate_members = true\n\n[pipeline]\nparallel = false\n");
    let result = strict.run(&build(&strict));
    let dups = result.diagnostics_of(DiagnosticKind::DuplicateMemberName);
    assert_eq!(dups.len(), 1);
    assert_eq!(dups[0].target.as_deref(), Some("App.T"));

    // both members are still emitted
    let text = result.artifact("App.T.g.cs").unwrap();
    assert!(text.contains("public int Id;"));
    assert!(text.contains("public long Id;"));
}

#[test]
fn duplicate_members_are_matched_by_mixin_identity() {
    let mut host =
        Host::with_config_str("[merge]\ndetect_duplicate_members = true\n\n[pipeline]\nparallel = false\n");
    let nodes = [
        host.mixin("A", "Logger").with_named_member("Log", "void Log(string m) {}"),
        host.mixin("B", "Logger").with_named_member("Log", "void Log(string m) {}"),
        host.target("App", "Service", &["A.Logger", "B.Logger"]),
    ];
    let result = host.run(&nodes);

    let dups = result.diagnostics_of(DiagnosticKind::DuplicateMemberName);
    assert_eq!(dups.len(), 1);
    assert_eq!(
        dups[0].message,
        "member `Log` is contributed by both `A.Logger` and `B.Logger`"
    );
}

#[test]
fn empty_header_is_omitted() {
    let mut host = Host::with_config_str("[emit]\nheader = \"\"\n");
    let target = host.target("", "Bare", &[]);
    let result = host.run(&[target]);
    assert_eq!(
        result.artifact("Bare.g.cs").unwrap(),
        "public partial class Bare\n{\n}\n"
    );
}
