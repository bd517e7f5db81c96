use repack_common::FxIndexMap;
use repack_parser::Token;
use smol_str::SmolStr;

/// A resolved `let` or `global` definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub name: SmolStr,
    pub value: String,
    /// The name token of the definition
    pub token: Token,
}

/// The variables of one scope, in definition order
#[derive(Debug, Default)]
pub struct Variables(FxIndexMap<SmolStr, Variable>);

impl Variables {
    /// Adds `variable` to this scope.
    ///
    /// If a variable with that name already exists, it is kept and the new one is returned.
    pub fn define(&mut self, variable: Variable) -> Result<(), Variable> {
        if self.0.contains_key(&variable.name) {
            return Err(variable);
        }
        self.0.insert(variable.name.clone(), variable);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Variable> {
        self.0.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
