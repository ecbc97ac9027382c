use std::fs;

/// Keys of the `[markdown]` table; each must be a boolean.
const MARKDOWN_KEYS: &[&str] = &["gfm", "breaks"];

fn main() {
    let config_path = "src/default_config.toml";
    println!("cargo:rerun-if-changed={}", config_path);

    let content = fs::read_to_string(config_path).expect("Failed to read default_config.toml");

    let table = match content.parse::<toml::Table>() {
        Ok(table) => table,
        Err(e) => panic!("Invalid default_config.toml: {}", e),
    };

    let Some(markdown) = table.get("markdown").and_then(toml::Value::as_table) else {
        panic!("default_config.toml: missing [markdown] table");
    };

    for key in markdown.keys() {
        if !MARKDOWN_KEYS.contains(&key.as_str()) {
            panic!("default_config.toml: unknown key markdown.{}", key);
        }
    }
    for key in MARKDOWN_KEYS {
        match markdown.get(*key) {
            Some(toml::Value::Boolean(_)) => {}
            Some(other) => panic!(
                "default_config.toml: markdown.{} must be a boolean, found {}",
                key,
                other.type_str()
            ),
            None => panic!("default_config.toml: markdown.{} is not set", key),
        }
    }
}
