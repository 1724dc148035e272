//! Rendering of merge results.

use weave_compose::MergeResult;
use weave_config::EmitConfig;
use weave_snapshot::MixinTarget;

use crate::artifact::{Artifact, ArtifactId};
use crate::builder::CodeBuilder;

/// The artifact id `target` renders to under `config`.
pub fn artifact_id(target: &MixinTarget, config: &EmitConfig) -> ArtifactId {
    ArtifactId::new(target.namespace(), target.name(), &config.artifact_suffix)
}

/// Renders `result` as a partial declaration of its target.
///
/// Layout: the header, sorted `using` directives, a namespace block when the
/// target has a namespace, then the declaration with one member per
/// paragraph in merge order. Member text is relocated verbatim unless
/// `reindent_members` is set.
pub fn render(result: &MergeResult, config: &EmitConfig) -> Artifact {
    let target = result.target();
    let mut b = CodeBuilder::new(config.indent_width);

    if !config.header.is_empty() {
        b.line(&config.header);
    }
    for using in result.merged_usings() {
        b.line(&format!("using {using};"));
    }
    if !config.header.is_empty() || !result.merged_usings().is_empty() {
        b.blank_line();
    }

    let namespaced = !target.namespace().is_empty();
    if namespaced {
        b.line(&format!("namespace {}", target.namespace()));
        b.open_block();
    }

    b.line(&declaration_line(target));
    b.open_block();
    for (i, member) in result.merged_members().iter().enumerate() {
        if i > 0 {
            b.blank_line();
        }
        if config.reindent_members {
            b.fragment_reindented(member.text());
        } else {
            b.fragment(member.text());
        }
    }
    b.close_block();

    if namespaced {
        b.close_block();
    }

    Artifact {
        id: artifact_id(target, config),
        text: b.finish(),
    }
}

/// `<modifiers> partial <keyword> <name> : <base>`, with `partial` placed
/// last among the modifiers unless already present.
fn declaration_line(target: &MixinTarget) -> String {
    let mut words: Vec<&str> = target.modifiers().iter().map(String::as_str).collect();
    if !words.contains(&"partial") {
        words.push("partial");
    }
    words.push(target.keyword());
    words.push(target.name());

    let mut line = words.join(" ");
    if !target.base_list().is_empty() {
        line.push_str(" : ");
        line.push_str(target.base_list());
    }
    line
}
