mod logging;

use anyhow::{Context, bail};
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use decl_errors::Renderer;
use decl_syntax::{DeclBlock, SyntaxTree};

#[derive(Parser)]
#[command(about = "Inspect and edit idTech4 decl files without losing formatting")]
enum Options {
    /// Report structural warnings.
    Check { path: Utf8PathBuf },
    /// List every top-level decl block.
    List { path: Utf8PathBuf },
    /// Print the contents of a block.
    Show { path: Utf8PathBuf, name: String },
    /// Print the file with a block renamed.
    Rename { path: Utf8PathBuf, name: String, new_name: String },
    /// Print the file with a block's contents replaced by those of another file.
    SetContents { path: Utf8PathBuf, name: String, contents: Utf8PathBuf },
}

impl Options {
    /// `check` renders parser warnings itself, so their log events are muted.
    fn default_log_filter(&self) -> &'static str {
        match self {
            Self::Check { .. } => "error",
            _ => "warn",
        }
    }
}

fn main() -> anyhow::Result<()> {
    let options = Options::parse();
    logging::init(options.default_log_filter());

    match options {
        Options::Check { path } => {
            let text = read(&path)?;
            let parse = decl_parse::parse(&text);
            let renderer = Renderer::styled();
            tracing::debug!(%path, warnings = parse.diagnostics().len(), "checked");

            for diagnostic in parse.diagnostics() {
                eprintln!("{}", diagnostic.render(&renderer, path.as_str(), &text));
            }
        }
        Options::List { path } => {
            let text = read(&path)?;
            let parse = decl_parse::parse(&text);
            let tree = parse.tree();
            tracing::debug!(%path, blocks = tree.blocks().count(), "listing blocks");

            tree.for_each_block(|block| {
                let type_name = block.type_name(tree).unwrap_or("<untyped>");
                let name = block.name(tree).unwrap_or("<unnamed>");
                println!("{type_name} {name}");
            });
        }
        Options::Show { path, name } => {
            let text = read(&path)?;
            let parse = decl_parse::parse(&text);
            let block = find(parse.tree(), &name, &path)?;
            println!("{}", block.contents(parse.tree()));
        }
        Options::Rename { path, name, new_name } => {
            let text = read(&path)?;
            let mut tree = decl_parse::parse(&text).into_tree();
            let block = find(&tree, &name, &path)?;
            tracing::debug!(%name, %new_name, "renaming block");

            tree.rename_block(block.id(), &new_name)
                .with_context(|| format!("cannot rename `{name}`"))?;
            print!("{}", tree.render());
        }
        Options::SetContents { path, name, contents } => {
            let text = read(&path)?;
            let contents = read(&contents)?;
            let mut tree = decl_parse::parse(&text).into_tree();
            let block = find(&tree, &name, &path)?;

            tree.set_block_contents(block.id(), &contents)
                .with_context(|| format!("cannot replace the contents of `{name}`"))?;
            print!("{}", tree.render());
        }
    }

    Ok(())
}

fn read(path: &Utf8Path) -> anyhow::Result<String> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("failed to read `{path}`"))?;
    tracing::debug!(%path, bytes = text.len(), "read decl file");
    Ok(text)
}

fn find(tree: &SyntaxTree<'_>, name: &str, path: &Utf8Path) -> anyhow::Result<DeclBlock> {
    match tree.find_first_named_block(name) {
        Some(block) => {
            tracing::debug!(%name, id = ?block.id(), "found block");
            Ok(block)
        }
        None => bail!("no decl named `{name}` in `{path}`"),
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser as _;

    use super::Options;

    fn default_log_filter(args: &[&str]) -> &'static str {
        Options::try_parse_from(args).unwrap().default_log_filter()
    }

    #[test]
    fn check_does_not_log_warnings_it_renders() {
        assert_eq!(default_log_filter(&["decl", "check", "a.def"]), "error");
        assert_eq!(default_log_filter(&["decl", "list", "a.def"]), "warn");
        assert_eq!(default_log_filter(&["decl", "show", "a.def", "m"]), "warn");
    }
}
