use crate::config::AppConfig;
use clap::Subcommand;
use constkeeper_shared::local_store::{LocalStore, StoredConstant};
use constkeeper_shared::masking::mask;
use constkeeper_shared::models::Environment;

pub mod form;

use form::{FormOutcome, open_form};

#[derive(Subcommand, PartialEq, Debug)]
pub enum Commands {
    /// Add a constant to the environment
    Add,
    /// Update the value of an existing constant
    Edit {
        /// Name of the constant
        name: String,
    },
    /// List the constants of the environment, values masked
    #[command(alias = "ls")]
    List,
    /// Delete a constant
    #[command(alias = "rm")]
    Delete {
        /// Name of the constant
        name: String,
    },
    /// List the configured environments
    Environments,
}

impl Commands {
    pub async fn run(self, config: AppConfig, environment: Option<String>) -> Result<(), String> {
        match self {
            Commands::Environments => {
                print!("{}", format_environments(&config));
            }
            Commands::Add => {
                let (environment, store) = open_scope(&config, environment.as_deref())?;
                let outcome =
                    open_form(store, environment.clone(), None, config.theme.resolve()).await?;
                report(&outcome, &environment);
            }
            Commands::Edit { name } => {
                let (environment, store) = open_scope(&config, environment.as_deref())?;
                let selected = store
                    .get(&name, &environment.id)
                    .map(|stored| stored.to_constant(&environment))
                    .ok_or_else(|| {
                        format!("Constant '{}' not found in {}", name, environment.name)
                    })?;
                let outcome = open_form(
                    store,
                    environment.clone(),
                    Some(selected),
                    config.theme.resolve(),
                )
                .await?;
                report(&outcome, &environment);
            }
            Commands::List => {
                let (environment, store) = open_scope(&config, environment.as_deref())?;
                print!("{}", format_constants(&store.list(&environment.id), &environment));
            }
            Commands::Delete { name } => {
                let (environment, mut store) = open_scope(&config, environment.as_deref())?;
                store
                    .delete(&name, &environment.id)
                    .map_err(|e| e.to_string())?;
                println!("Deleted {} from {}", name, environment.name);
            }
        }
        Ok(())
    }
}

/// Resolve the working environment and load the store.
fn open_scope(
    config: &AppConfig,
    requested: Option<&str>,
) -> Result<(Environment, LocalStore), String> {
    let environment = config.environment(requested).map_err(|e| e.to_string())?;
    let store = LocalStore::load(&config.store_path).map_err(|e| e.to_string())?;
    Ok((environment, store))
}

fn report(outcome: &FormOutcome, environment: &Environment) {
    match outcome {
        FormOutcome::Saved { name, is_edit } => {
            let action = if *is_edit { "Updated" } else { "Added" };
            println!("{} {} in {}", action, name, environment.name);
        }
        FormOutcome::Cancelled => println!("Cancelled"),
    }
}

fn format_environments(config: &AppConfig) -> String {
    let mut out = String::new();
    for env in &config.environments {
        let marker = if env.id == config.default_environment {
            "*"
        } else {
            " "
        };
        out.push_str(&format!("{} {:<16} {}\n", marker, env.id, env.name));
    }
    out
}

fn format_constants(constants: &[&StoredConstant], environment: &Environment) -> String {
    if constants.is_empty() {
        return format!("No constants in {}\n", environment.name);
    }
    let mut out = String::new();
    for constant in constants {
        out.push_str(&format!(
            "{:<32}  {:<12}  {}\n",
            constant.name,
            truncate_mask(&mask(constant.expose_value())),
            constant.updated_at.format("%Y-%m-%d %H:%M")
        ));
    }
    out
}

/// Listings never show more than a short run of mask characters.
fn truncate_mask(masked: &str) -> String {
    masked.chars().take(12).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use constkeeper_shared::models::Constant;
    use tempfile::TempDir;

    #[test]
    fn test_constants_are_listed_masked() {
        let dir = TempDir::new().unwrap_or_else(|e| panic!("{}", e));
        let mut store = LocalStore::load(dir.path().join("constants.toml"))
            .unwrap_or_else(|e| panic!("{}", e));
        let staging = Environment::new("staging", "staging");
        let draft = Constant::new("DB_PASSWORD", "hunter2", vec![staging.as_option()]);
        assert!(store.create_or_update(&draft, false).is_ok());
        let long = Constant::new("CERT", "x".repeat(400), vec![staging.as_option()]);
        assert!(store.create_or_update(&long, false).is_ok());

        let output = format_constants(&store.list("staging"), &staging);
        assert!(output.contains("DB_PASSWORD"));
        assert!(output.contains("*******"));
        assert!(!output.contains("hunter2"));
        assert!(!output.contains(&"*".repeat(13)));
        assert!(output.find("CERT") < output.find("DB_PASSWORD"));
    }

    #[test]
    fn test_empty_listing() {
        let env = Environment::new("qa", "QA");
        assert_eq!(format_constants(&[], &env), "No constants in QA\n");
    }
}
