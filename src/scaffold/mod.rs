//! # Scaffold Module
//!
//! `went make-model <Name>` renders a model and a controller source file from
//! minijinja templates.
//!
//! Templates see three variables:
//!
//! - `ModelName`: the type name (`BlogPost`)
//! - `TableName`: lower-cased plural (`blogposts`)
//! - `module_name`: snake-case module name (`blog_post`)
//!
//! The built-in templates are compiled into the binary; `--templates DIR`
//! replaces them with `DIR/model.rs.j2` and `DIR/controller.rs.j2`.
//! Existing files are skipped unless `force` is set.

use crate::error::ScaffoldError;
use minijinja::{context, Environment};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const MODEL_TEMPLATE: &str = "model.rs.j2";
pub const CONTROLLER_TEMPLATE: &str = "controller.rs.j2";

const DEFAULT_MODEL_TEMPLATE: &str = include_str!("../../templates/model.rs.j2");
const DEFAULT_CONTROLLER_TEMPLATE: &str = include_str!("../../templates/controller.rs.j2");

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldOptions {
    /// Root under which `models/` and `controllers/` are created
    pub out_dir: PathBuf,
    /// Directory holding replacement templates
    pub templates_dir: Option<PathBuf>,
    /// Overwrite files that already exist
    pub force: bool,
}

impl Default for ScaffoldOptions {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("src"),
            templates_dir: None,
            force: false,
        }
    }
}

/// What happened to one output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Created(PathBuf),
    Overwritten(PathBuf),
    Skipped(PathBuf),
}

impl FileOutcome {
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            FileOutcome::Created(p) | FileOutcome::Overwritten(p) | FileOutcome::Skipped(p) => p,
        }
    }
}

/// Names derived from the model name given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelNames {
    pub model_name: String,
    pub table_name: String,
    pub module_name: String,
}

impl ModelNames {
    /// Validate `raw` and derive the template names. The first letter is
    /// upper-cased (`user` -> `User`).
    ///
    /// # Errors
    ///
    /// [`ScaffoldError::InvalidName`] unless `raw` is ASCII alphanumeric and
    /// starts with a letter.
    pub fn parse(raw: &str) -> Result<Self, ScaffoldError> {
        let mut chars = raw.chars();
        let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
            && chars.all(|c| c.is_ascii_alphanumeric());
        if !valid {
            return Err(ScaffoldError::InvalidName(raw.to_string()));
        }
        let model_name = format!("{}{}", raw[..1].to_ascii_uppercase(), &raw[1..]);
        Ok(Self {
            table_name: format!("{}s", model_name.to_lowercase()),
            module_name: snake_case(&model_name),
            model_name,
        })
    }
}

fn snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

fn load_template(dir: Option<&Path>, name: &str, fallback: &str) -> Result<String, ScaffoldError> {
    let Some(dir) = dir else {
        return Ok(fallback.to_string());
    };
    let path = dir.join(name);
    fs::read_to_string(&path).map_err(|source| ScaffoldError::Io { path, source })
}

fn render(env: &Environment<'_>, name: &str, names: &ModelNames) -> Result<String, ScaffoldError> {
    let to_err = |source: minijinja::Error| ScaffoldError::Template {
        name: name.to_string(),
        source,
    };
    let template = env.get_template(name).map_err(to_err)?;
    template
        .render(context! {
            ModelName => &names.model_name,
            TableName => &names.table_name,
            module_name => &names.module_name,
        })
        .map_err(to_err)
}

fn write_output(path: &Path, contents: &str, force: bool) -> Result<FileOutcome, ScaffoldError> {
    let existed = path.exists();
    if existed && !force {
        info!(path = %path.display(), "Skipped (already exists)");
        return Ok(FileOutcome::Skipped(path.to_path_buf()));
    }
    let io_err = |source: std::io::Error| ScaffoldError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    fs::write(path, contents).map_err(io_err)?;
    debug!(path = %path.display(), bytes = contents.len(), "Wrote scaffold file");
    Ok(if existed {
        FileOutcome::Overwritten(path.to_path_buf())
    } else {
        FileOutcome::Created(path.to_path_buf())
    })
}

/// Render the model and controller files for `name`.
///
/// # Errors
///
/// Invalid names, unreadable or malformed templates and write failures.
/// Both templates are rendered before anything is written.
pub fn make_model(name: &str, opts: &ScaffoldOptions) -> Result<Vec<FileOutcome>, ScaffoldError> {
    let names = ModelNames::parse(name)?;
    let dir = opts.templates_dir.as_deref();

    let model_src = load_template(dir, MODEL_TEMPLATE, DEFAULT_MODEL_TEMPLATE)?;
    let controller_src = load_template(dir, CONTROLLER_TEMPLATE, DEFAULT_CONTROLLER_TEMPLATE)?;

    let mut env = Environment::new();
    env.add_template(MODEL_TEMPLATE, &model_src)
        .map_err(|source| ScaffoldError::Template {
            name: MODEL_TEMPLATE.to_string(),
            source,
        })?;
    env.add_template(CONTROLLER_TEMPLATE, &controller_src)
        .map_err(|source| ScaffoldError::Template {
            name: CONTROLLER_TEMPLATE.to_string(),
            source,
        })?;

    let model = render(&env, MODEL_TEMPLATE, &names)?;
    let controller = render(&env, CONTROLLER_TEMPLATE, &names)?;

    let model_path = opts
        .out_dir
        .join("models")
        .join(format!("{}.rs", names.module_name));
    let controller_path = opts
        .out_dir
        .join("controllers")
        .join(format!("{}_controller.rs", names.module_name));

    Ok(vec![
        write_output(&model_path, &model, opts.force)?,
        write_output(&controller_path, &controller, opts.force)?,
    ])
}
