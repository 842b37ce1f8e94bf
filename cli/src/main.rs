use std::cell::RefCell;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, ValueEnum};
use friendgraph::source::{vk, Vk};
use friendgraph::{input, output, Collector, Executor, Input};
use log::debug;

use crate::config::{Config, GeneratorName, Output};

mod config;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();
    let config = Config::parse();

    if config.authorize {
        let app_id = config
            .app_id
            .as_deref()
            .ok_or_else(|| anyhow!("--authorize requires an app id"))?;
        println!(
            "Open this URL, allow access and copy the access_token from the address bar:\n{}",
            vk::authorize_url(app_id)
        );
        return Ok(());
    }

    match &config.records {
        Some(path) => run(input::JsonFile::new(path), &config),
        None => run(collector(&config)?, &config),
    }
}

fn run<I: Input>(input: I, config: &Config) -> Result<()> {
    let mut exe = Executor::new(input);
    for generator_name in &config.generator {
        exe = add_generator(*generator_name, config, exe)?;
    }
    exe.execute()
}

fn collector(config: &Config) -> Result<Collector<Vk>> {
    let user_id = config
        .user_id
        .as_deref()
        .ok_or_else(|| anyhow!("a user id is required, set --user-id or USER_ID"))?;
    let access_token = config
        .access_token
        .clone()
        .ok_or_else(|| anyhow!("an access token is required, set --access-token or ACCESS_TOKEN"))?;
    let source_config = vk::Config {
        access_token,
        ..source_config(config)?
    };
    debug!("Source config: {:#?}", source_config);
    let source = Vk::new(source_config).context("create VK client")?;
    Ok(Collector::new(source, user_id).delay(Duration::from_millis(config.delay_ms)))
}

fn source_config(config: &Config) -> Result<vk::Config> {
    match &config.source_config {
        None => Ok(Default::default()),
        Some(path) => {
            let file = File::open(path).context("read source config")?;
            let reader = BufReader::new(file);
            Ok(serde_json::from_reader(reader)?)
        }
    }
}

fn add_generator<I: Input>(
    generator_name: GeneratorName,
    config: &Config,
    mut exe: Executor<I>,
) -> Result<Executor<I>> {
    exe = exe.generator_boxed(generator_name.create_impl(config));
    if config.dry_run {
        return Ok(exe.output(output::StdOut::new(header(generator_name))));
    }
    let mut has_output = false;
    for output_config in &config.output {
        if output_config.generator != generator_name {
            continue;
        }
        exe = exe.output_ptr(output(output_path(config, output_config))?);
        has_output = true;
    }
    if !has_output {
        exe = exe.output_ptr(output(default_output_path(config, generator_name))?);
    }
    if config.stdout.contains(&generator_name) {
        exe = exe.output(output::StdOut::new(header(generator_name)));
    }
    Ok(exe)
}

fn header(generator_name: GeneratorName) -> String {
    match generator_name.to_possible_value() {
        Some(value) => format!("== {} ==", value.get_name()),
        None => String::new(),
    }
}

fn default_output_path(config: &Config, generator_name: GeneratorName) -> PathBuf {
    config.output_root.join(generator_name.default_file_name())
}

fn output_path(config: &Config, output: &Output) -> PathBuf {
    config.output_root.join(&output.path)
}

fn output(path: PathBuf) -> Result<Rc<RefCell<output::File>>> {
    Ok(Rc::new(RefCell::new(output::File::new(path)?)))
}

#[cfg(test)]
mod tests {
    use std::ffi::OsStr;
    use std::fs;
    use std::path::PathBuf;

    use anyhow::Result;
    use clap::Parser;
    use friendgraph::{input, Input};
    use tempfile::tempdir;

    use crate::config::{Config, GeneratorName, MeasureName, Output};
    use crate::{default_output_path, header, output_path, run};

    #[test]
    fn test_output_path() {
        let mut config = test_config();
        config.output_root = PathBuf::from("a/b/c");
        assert_eq!(
            output_path(
                &config,
                &Output {
                    generator: GeneratorName::Gml,
                    path: PathBuf::from("x/y/z.gml"),
                }
            ),
            PathBuf::from("a/b/c/x/y/z.gml")
        );
    }

    #[test]
    fn test_default_output_path() {
        let mut config = test_config();
        config.output_root = PathBuf::from("a/b/c");
        assert_eq!(
            default_output_path(&config, GeneratorName::Json),
            PathBuf::from("a/b/c/friends_of_friends.json")
        );
        assert_eq!(
            default_output_path(&config, GeneratorName::Gml),
            PathBuf::from("a/b/c/friends_network.gml")
        );
    }

    #[test]
    fn reanalysing_records_in_place_keeps_them() -> Result<()> {
        let root = tempdir()?;
        let path = root.path().join("friends_of_friends.json");
        fs::write(
            &path,
            r#"[{"id": 1, "friends_ids": ["2"]}, {"id": 2, "friends_ids": ["1"]}]"#,
        )?;
        let config = Config::try_parse_from([
            OsStr::new("friendgraph"),
            OsStr::new("--records"),
            path.as_os_str(),
            OsStr::new("--output-root"),
            root.path().as_os_str(),
            OsStr::new("-g"),
            OsStr::new("json"),
        ])?;

        run(input::JsonFile::new(&path), &config)?;

        let records = input::JsonFile::new(&path).records()?;
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].friends_ids, vec!["2".to_string()]);
        Ok(())
    }

    #[test]
    fn test_header() {
        assert_eq!(header(GeneratorName::Summary), "== summary ==");
    }

    fn test_config() -> Config {
        Config {
            user_id: None,
            access_token: None,
            app_id: None,
            authorize: false,
            records: None,
            source_config: None,
            delay_ms: 0,
            generator: vec![],
            output_root: Default::default(),
            output: vec![],
            stdout: vec![],
            dry_run: false,
            seed: None,
            p_er: None,
            m_ba: None,
            p_ws: 0.4,
            top: 15,
            measure: MeasureName::Degree,
            bins: 50,
        }
    }
}
