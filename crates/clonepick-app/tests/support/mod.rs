use std::collections::VecDeque;
use std::fs::{self, File};
use std::path::Path;
use std::sync::Mutex;

use anyhow::anyhow;
use clonepick_core::command_runner::{CommandOutput, CommandRunner};

#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct Call {
    pub program: String,
    pub args: Vec<String>,
}

#[derive(Default)]
pub struct QueueRunner {
    outputs: Mutex<VecDeque<anyhow::Result<CommandOutput>>>,
    calls: Mutex<Vec<Call>>,
}

impl QueueRunner {
    pub fn new(outputs: Vec<anyhow::Result<CommandOutput>>) -> Self {
        Self {
            outputs: Mutex::new(outputs.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    #[allow(dead_code)]
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("calls lock").clone()
    }
}

impl CommandRunner for QueueRunner {
    fn run(&self, program: &str, args: &[&str]) -> anyhow::Result<CommandOutput> {
        self.calls.lock().expect("calls lock").push(Call {
            program: program.to_string(),
            args: args.iter().map(|value| (*value).to_string()).collect(),
        });

        self.outputs
            .lock()
            .expect("outputs lock")
            .pop_front()
            .unwrap_or_else(|| Err(anyhow!("missing scripted output")))
    }
}

#[allow(dead_code)]
pub fn ok_output(stdout: &str) -> anyhow::Result<CommandOutput> {
    Ok(CommandOutput {
        status_code: 0,
        stdout: stdout.to_string(),
        stderr: String::new(),
    })
}

#[allow(dead_code)]
pub fn failed_output(stderr: &str, status_code: i32) -> anyhow::Result<CommandOutput> {
    Ok(CommandOutput {
        status_code,
        stdout: String::new(),
        stderr: stderr.to_string(),
    })
}

#[allow(dead_code)]
pub fn write_config(path: &Path, extra: &str) {
    fs::write(
        path,
        format!(
            r#"
version = 1

[[accounts]]
id = 1
login = "octocat"
{extra}
"#
        ),
    )
    .expect("write config");
}

#[allow(dead_code)]
pub fn sized_file(path: &Path, size: u64) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent");
    }
    File::create(path)
        .expect("create file")
        .set_len(size)
        .expect("set length");
}
