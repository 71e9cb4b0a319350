#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;

use flatns_core::{NamespaceError, NonLocalExit, SymbolBridge};

/// Bridge over two plain maps. Symbols and values are strings; invoking a
/// function renders the call so tests can inspect the argument list.
#[derive(Default)]
pub struct TableBridge {
    functions: RefCell<HashMap<String, String>>,
    values: RefCell<HashMap<String, String>>,
    pub interned: RefCell<Vec<String>>,
}

impl TableBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_function(self, name: &str, body: &str) -> Self {
        self.functions
            .borrow_mut()
            .insert(name.to_string(), body.to_string());
        self
    }

    pub fn with_value(self, name: &str, value: &str) -> Self {
        self.values
            .borrow_mut()
            .insert(name.to_string(), value.to_string());
        self
    }

    pub fn value(&self, name: &str) -> Option<String> {
        self.values.borrow().get(name).cloned()
    }

    pub fn function(&self, name: &str) -> Option<String> {
        self.functions.borrow().get(name).cloned()
    }

    pub fn value_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.values.borrow().keys().cloned().collect();
        names.sort();
        names
    }
}

impl SymbolBridge for TableBridge {
    type Symbol = String;
    type Value = String;

    fn intern(&self, name: &str) -> Result<String, NamespaceError<String>> {
        if name.chars().any(char::is_whitespace) {
            return Err(NamespaceError::invalid_name(name, "whitespace"));
        }
        self.interned.borrow_mut().push(name.to_string());
        Ok(name.to_string())
    }

    fn is_function_bound(&self, symbol: &String) -> bool {
        self.functions.borrow().contains_key(symbol)
    }

    fn is_value_bound(&self, symbol: &String) -> bool {
        self.values.borrow().contains_key(symbol)
    }

    fn get_function(&self, symbol: &String) -> Result<String, NonLocalExit<String>> {
        self.function(symbol)
            .ok_or_else(|| NonLocalExit::signal("void-function".into(), symbol.clone()))
    }

    fn set_function(&self, symbol: &String, function: String) -> Result<(), NonLocalExit<String>> {
        self.functions.borrow_mut().insert(symbol.clone(), function);
        Ok(())
    }

    fn get_value(&self, symbol: &String) -> Result<String, NonLocalExit<String>> {
        self.value(symbol)
            .ok_or_else(|| NonLocalExit::signal("void-variable".into(), symbol.clone()))
    }

    fn set_value(&self, symbol: &String, value: String) -> Result<(), NonLocalExit<String>> {
        self.values.borrow_mut().insert(symbol.clone(), value);
        Ok(())
    }

    fn invoke(&self, function: &String, args: Vec<String>) -> Result<String, NonLocalExit<String>> {
        match function.as_str() {
            "boom" => Err(NonLocalExit::signal("error".into(), args.join(" "))),
            "escape" => Err(NonLocalExit::throw("done".into(), args.join(" "))),
            body => Ok(format!("({} {})", body, args.join(" "))),
        }
    }

    fn symbol_value(&self, symbol: &String) -> String {
        symbol.clone()
    }
}
