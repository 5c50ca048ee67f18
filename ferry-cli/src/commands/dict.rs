use anyhow::{bail, Result};
use ferry::{DictionaryEditor, GatewayConfig};
use std::path::Path;

pub fn run_dict_list(config_path: &str) -> Result<()> {
    let config = GatewayConfig::load_or_create(Path::new(config_path))?;
    let env = DictionaryEditor::new(&config.dictionary).list();
    if !env.is_ok() {
        bail!("{}", env.message);
    }
    println!("{}", serde_json::to_string_pretty(&env.data)?);
    Ok(())
}

pub fn run_dict_add(config_path: &str, words: &str) -> Result<()> {
    let config = GatewayConfig::load_or_create(Path::new(config_path))?;
    let env = DictionaryEditor::new(&config.dictionary).add(words);
    if !env.is_ok() {
        bail!("{}", env.message);
    }
    println!("{}", serde_json::to_string_pretty(&env.data)?);
    Ok(())
}
