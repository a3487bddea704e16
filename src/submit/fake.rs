use crate::submit::runner::{ToolOutput, ToolRunner};

use serde::Deserialize;
use serde_yaml::Value as YamlValue;
use std::cell::RefCell;
use std::collections::BTreeSet;
use std::io;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub program: String,
    pub args: Vec<String>,
    /// Content of the `-f` file at call time, if it was a local file.
    pub document: Option<String>,
}

impl Call {
    pub fn verb(&self) -> Option<&str> {
        self.args.first().map(String::as_str)
    }
}

struct Rule {
    needle: String,
    exit_code: i32,
    stderr: String,
}

/// Records every invocation and tracks kubectl objects by kind, namespace and
/// name. `create` of an object that already exists, whether it was created
/// or applied, fails with `AlreadyExists`. `apply` creates or updates, and
/// rejects objects that only carry `generateName`. Rules take precedence.
#[derive(Default)]
pub struct FakeRunner {
    calls: RefCell<Vec<Call>>,
    existing: RefCell<BTreeSet<ObjectKey>>,
    rules: Vec<Rule>,
    missing_binary: bool,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Any invocation whose joined arguments contain `needle` exits with
    /// `exit_code` and `stderr`.
    pub fn failing_on(mut self, needle: &str, exit_code: i32, stderr: &str) -> Self {
        self.rules.push(Rule {
            needle: needle.to_string(),
            exit_code,
            stderr: stderr.to_string(),
        });
        self
    }

    /// Every invocation fails to start.
    pub fn without_binary(mut self) -> Self {
        self.missing_binary = true;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }
}

impl ToolRunner for FakeRunner {
    fn run(&self, program: &str, args: &[String]) -> io::Result<ToolOutput> {
        if self.missing_binary {
            return Err(io::Error::new(io::ErrorKind::NotFound, format!("{program}: not found")));
        }

        let document = args
            .windows(2)
            .find(|w| w[0] == "-f")
            .and_then(|w| std::fs::read_to_string(&w[1]).ok());

        let call = Call {
            program: program.to_string(),
            args: args.to_vec(),
            document: document.clone(),
        };
        let verb = call.verb().map(str::to_string);
        self.calls.borrow_mut().push(call);

        let joined = args.join(" ");
        if let Some(rule) = self.rules.iter().find(|r| joined.contains(&r.needle)) {
            return Ok(output(rule.exit_code, &rule.stderr));
        }
        if program != "kubectl" {
            return Ok(output(0, ""));
        }

        // `kubectl create namespace <name>` carries no file.
        let objects = match (verb.as_deref(), &document, args.get(1), args.get(2)) {
            (Some("create"), None, Some(kind), Some(name)) if kind == "namespace" => {
                vec![Object::named("Namespace", "", name)]
            }
            (_, Some(text), _, _) => objects(text),
            _ => Vec::new(),
        };

        match verb.as_deref() {
            Some("create") => self.create(objects),
            Some("apply") => self.apply(objects),
            _ => Ok(output(0, "")),
        }
    }
}

impl FakeRunner {
    fn create(&self, objects: Vec<Object>) -> io::Result<ToolOutput> {
        let mut existing = self.existing.borrow_mut();
        let keys: Vec<ObjectKey> = objects.into_iter().filter_map(|o| o.key).collect();
        if let Some((kind, _, name)) = keys.iter().find(|k| existing.contains(*k)) {
            return Ok(output(
                1,
                &format!("Error from server (AlreadyExists): {kind} \"{name}\" already exists\n"),
            ));
        }
        existing.extend(keys);
        Ok(output(0, ""))
    }

    fn apply(&self, objects: Vec<Object>) -> io::Result<ToolOutput> {
        if objects.iter().any(|o| o.key.is_none()) {
            return Ok(output(1, "error: cannot use generate name with apply\n"));
        }
        self.existing
            .borrow_mut()
            .extend(objects.into_iter().filter_map(|o| o.key));
        Ok(output(0, ""))
    }
}

/// `(kind, metadata.namespace, metadata.name)`.
type ObjectKey = (String, String, String);

/// One manifest object. `key` is `None` for objects named by the server
/// (`metadata.generateName`).
struct Object {
    key: Option<ObjectKey>,
}

impl Object {
    fn named(kind: &str, namespace: &str, name: &str) -> Self {
        Self {
            key: Some((kind.to_string(), namespace.to_string(), name.to_string())),
        }
    }
}

/// Objects of every mapping document in `text`; scalars and unparsable
/// documents are skipped.
fn objects(text: &str) -> Vec<Object> {
    serde_yaml::Deserializer::from_str(text)
        .filter_map(|d| YamlValue::deserialize(d).ok())
        .filter(YamlValue::is_mapping)
        .map(|doc| {
            let field = |v: &YamlValue| v.as_str().unwrap_or_default().to_string();
            let metadata = &doc["metadata"];
            if metadata["name"].is_null() && !metadata["generateName"].is_null() {
                Object { key: None }
            } else {
                Object {
                    key: Some((
                        field(&doc["kind"]),
                        field(&metadata["namespace"]),
                        field(&metadata["name"]),
                    )),
                }
            }
        })
        .collect()
}

fn output(exit_code: i32, stderr: &str) -> ToolOutput {
    ToolOutput {
        exit_code,
        stdout: String::new(),
        stderr: stderr.to_string(),
    }
}
