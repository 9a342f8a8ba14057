//! Command handler for the cache shell

use crate::reply::Reply;
use std::sync::Arc;
use weightlru::Cache;

/// Cache type driven by the shell: string keys and values
pub type StringCache = Cache<String, String>;

pub struct CommandHandler {
    cache: Arc<StringCache>,
}

impl CommandHandler {
    pub fn new(cache: Arc<StringCache>) -> Self {
        Self { cache }
    }

    pub fn handle(&self, words: &[String]) -> Reply {
        let (command, args) = match words.split_first() {
            Some((cmd, args)) => (cmd.to_uppercase(), args),
            None => return Reply::err("empty command"),
        };

        match command.as_str() {
            "PING" => Reply::Simple("PONG".to_string()),
            "INSERT" => self.handle_insert(args),
            "GET" => self.handle_get(args),
            "SET" => self.handle_set(args),
            "DEL" => self.handle_del(args),
            "EXISTS" => self.handle_exists(args),
            "OLDEST" => self.handle_peek(args, "oldest"),
            "NEWEST" => self.handle_peek(args, "newest"),
            "RESIZE" => self.handle_resize(args),
            "CLEAR" => self.handle_clear(args),
            "LEN" => self.handle_len(args),
            "KEYS" => self.handle_keys(args),
            "INFO" => self.handle_info(args),
            _ => Reply::err(format!("unknown command '{}'", command)),
        }
    }

    fn handle_insert(&self, args: &[String]) -> Reply {
        let [key, value] = args else {
            return arity("insert");
        };

        match self.cache.insert(key.clone(), value.clone()) {
            Ok(()) => Reply::ok(),
            Err(e) => Reply::err(e),
        }
    }

    fn handle_get(&self, args: &[String]) -> Reply {
        let [key] = args else {
            return arity("get");
        };
        Reply::Bulk(self.cache.get(key.as_str()))
    }

    fn handle_set(&self, args: &[String]) -> Reply {
        let [key, value] = args else {
            return arity("set");
        };

        match self.cache.set(key.as_str(), value.clone()) {
            Ok(()) => Reply::ok(),
            Err(e) => Reply::err(e),
        }
    }

    fn handle_del(&self, args: &[String]) -> Reply {
        if args.is_empty() {
            return arity("del");
        }

        let deleted = args
            .iter()
            .filter(|key| self.cache.remove(key.as_str()))
            .count();
        Reply::Integer(deleted as i64)
    }

    fn handle_exists(&self, args: &[String]) -> Reply {
        if args.is_empty() {
            return arity("exists");
        }

        let count = args
            .iter()
            .filter(|key| self.cache.contains(key.as_str()))
            .count();
        Reply::Integer(count as i64)
    }

    fn handle_peek(&self, args: &[String], end: &str) -> Reply {
        if !args.is_empty() {
            return arity(end);
        }

        let entry = if end == "oldest" {
            self.cache.peek_oldest()
        } else {
            self.cache.peek_newest()
        };
        Reply::Bulk(entry.map(|(k, v)| format!("{} {}", k, v)))
    }

    fn handle_resize(&self, args: &[String]) -> Reply {
        let [size] = args else {
            return arity("resize");
        };

        let max_size: usize = match size.parse() {
            Ok(n) => n,
            Err(_) => return Reply::err("value is not an integer or out of range"),
        };

        match self.cache.resize(max_size) {
            Ok(()) => Reply::ok(),
            Err(e) => Reply::err(e),
        }
    }

    fn handle_clear(&self, args: &[String]) -> Reply {
        if !args.is_empty() {
            return arity("clear");
        }
        self.cache.clear();
        Reply::ok()
    }

    fn handle_len(&self, args: &[String]) -> Reply {
        if !args.is_empty() {
            return arity("len");
        }
        Reply::Integer(self.cache.len() as i64)
    }

    fn handle_keys(&self, args: &[String]) -> Reply {
        if !args.is_empty() {
            return arity("keys");
        }
        Reply::Lines(self.cache.keys())
    }

    fn handle_info(&self, args: &[String]) -> Reply {
        if !args.is_empty() {
            return arity("info");
        }

        let stats = self.cache.stats();
        Reply::Lines(vec![
            self.cache.describe(),
            format!("entries:{}", self.cache.len()),
            format!("hit_ratio:{:.2}", stats.hit_ratio()),
        ])
    }
}

fn arity(command: &str) -> Reply {
    Reply::err(format!(
        "wrong number of arguments for '{}' command",
        command
    ))
}
