//! Operations the host program drives a [`Backend`] with.

use anyhow::{bail, Context, Result};

use crate::backend::Backend;
use crate::storage::engine::Engine;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Put(Vec<u8>, Vec<u8>),
    Get(Vec<u8>),
    Delete(Vec<u8>),
    Flush,
    Stats,
}

impl Command {
    /// Parse a flat token list such as `put a 1 get a stats`.
    pub fn parse_all<S: AsRef<str>>(tokens: &[S]) -> Result<Vec<Command>> {
        let mut tokens = tokens.iter().map(AsRef::<str>::as_ref);
        let mut commands = Vec::new();

        while let Some(verb) = tokens.next() {
            let mut arg = |name: &str| {
                tokens
                    .next()
                    .map(|s| s.as_bytes().to_vec())
                    .with_context(|| format!("`{verb}` is missing its {name}"))
            };

            let command = match verb.to_ascii_lowercase().as_str() {
                "put" => {
                    let key = arg("key")?;
                    Command::Put(key, arg("value")?)
                }
                "get" => Command::Get(arg("key")?),
                "delete" | "del" => Command::Delete(arg("key")?),
                "flush" => Command::Flush,
                "stats" => Command::Stats,
                other => bail!("unknown operation `{other}`"),
            };
            commands.push(command);
        }

        Ok(commands)
    }

    /// The sequence run when no operations are given on the command line.
    pub fn demo() -> Vec<Command> {
        vec![
            Command::Put(b"1".to_vec(), b"0".to_vec()),
            Command::Get(b"1".to_vec()),
            Command::Put(b"1".to_vec(), b"-1".to_vec()),
            Command::Get(b"1".to_vec()),
            Command::Put(b"`~!@#$%^&*()_+".to_vec(), b"ABCDEFGHIJKLMNOPQRSTUVWXYZ ".to_vec()),
            Command::Put(b"a".to_vec(), b"b".to_vec()),
            Command::Delete(b"a".to_vec()),
            Command::Get(b"a".to_vec()),
            Command::Stats,
            Command::Flush,
            Command::Stats,
        ]
    }

    /// Run the command and render its outcome for display.
    pub fn apply<E: Engine>(&self, backend: &mut Backend<E>) -> crate::Result<String> {
        match self {
            Command::Put(key, value) => backend.put(key, value).map(|_| "OK".to_string()),
            Command::Get(key) => backend
                .get(key)
                .map(|value| String::from_utf8_lossy(&value).into_owned()),
            Command::Delete(key) => backend.delete(key).map(|_| "OK".to_string()),
            Command::Flush => backend.flush().map(|_| "OK".to_string()),
            Command::Stats => Ok(backend.stats()),
        }
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let show = |b: &[u8]| String::from_utf8_lossy(b).into_owned();
        match self {
            Command::Put(k, v) => write!(f, "put {} {}", show(k), show(v)),
            Command::Get(k) => write!(f, "get {}", show(k)),
            Command::Delete(k) => write!(f, "delete {}", show(k)),
            Command::Flush => f.write_str("flush"),
            Command::Stats => f.write_str("stats"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, Op};

    #[test]
    fn parse_sequence() {
        let cmds = Command::parse_all(&["put", "a", "1", "GET", "a", "del", "a", "flush", "stats"])
            .unwrap();
        assert_eq!(
            cmds,
            vec![
                Command::Put(b"a".to_vec(), b"1".to_vec()),
                Command::Get(b"a".to_vec()),
                Command::Delete(b"a".to_vec()),
                Command::Flush,
                Command::Stats,
            ]
        );
    }

    #[test]
    fn parse_empty() {
        let cmds = Command::parse_all::<&str>(&[]).unwrap();
        assert!(cmds.is_empty());
    }

    #[test]
    fn parse_missing_argument() {
        let err = Command::parse_all(&["put", "a"]).unwrap_err();
        assert!(err.to_string().contains("missing its value"));

        let err = Command::parse_all(&["get"]).unwrap_err();
        assert!(err.to_string().contains("missing its key"));
    }

    #[test]
    fn parse_unknown_verb() {
        let err = Command::parse_all(&["frobnicate"]).unwrap_err();
        assert!(err.to_string().contains("unknown operation `frobnicate`"));
    }

    #[test]
    fn apply_reports_results() {
        let mut db = Backend::new(|_: i32| {});
        db.initialize().unwrap();

        let put = Command::Put(b"k".to_vec(), b"v".to_vec());
        assert_eq!(put.apply(&mut db).unwrap(), "OK");
        assert_eq!(Command::Get(b"k".to_vec()).apply(&mut db).unwrap(), "v");
        assert_eq!(Command::Stats.apply(&mut db).unwrap(), "k v\n");
        assert_eq!(Command::Delete(b"k".to_vec()).apply(&mut db).unwrap(), "OK");
        assert_eq!(
            Command::Get(b"k".to_vec()).apply(&mut db),
            Err(Error::KeyNotFound(Op::Get))
        );
    }

    #[test]
    fn demo_runs_to_empty_store() {
        let mut db = Backend::new(|_: i32| {});
        db.initialize().unwrap();

        let failures = Command::demo()
            .iter()
            .filter(|cmd| cmd.apply(&mut db).is_err())
            .count();

        // only the get after delete fails
        assert_eq!(failures, 1);
        assert!(db.is_empty());
    }

    #[test]
    fn display() {
        assert_eq!(Command::Put(b"a".to_vec(), b"b".to_vec()).to_string(), "put a b");
        assert_eq!(Command::Flush.to_string(), "flush");
    }
}
