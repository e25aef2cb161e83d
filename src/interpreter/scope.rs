use std::{collections::HashMap, fmt::Write};

use crate::interpreter::value::{DataKind, Value};

/// Stable handle of a symbol table inside [`Scopes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(usize);

impl ScopeId {
    /// The table of the program root, always the first one opened.
    pub const ROOT: Self = Self(0);
}

/// Stable handle of a symbol inside [`Scopes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(usize);

/// A named, typed storage location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    /// The declared name.
    pub name:  String,
    /// The data kind, fixed at declaration.
    pub kind:  DataKind,
    /// The current value. Always of kind `kind`.
    pub value: Value,
}

impl Symbol {
    /// Creates a symbol holding the default value of its kind.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: DataKind) -> Self {
        Self { name: name.into(),
               kind,
               value: kind.default_value() }
    }

    /// One-line rendering used by the debug dumps: name and kind in fixed
    /// width columns, then the quoted value unless it renders empty.
    ///
    /// ## Example
    /// ```
    /// use kab::interpreter::{scope::Symbol, value::DataKind};
    ///
    /// let symbol = Symbol::new("greeting", DataKind::Textual);
    /// assert_eq!(symbol.describe(), "Symbol: greeting              string");
    /// ```
    #[must_use]
    pub fn describe(&self) -> String {
        let value = self.value.to_string();
        let line = format!("Symbol: {:<20}  {:<12}", self.name, self.kind.to_string());
        if value.is_empty() {
            line.trim_end().to_string()
        } else {
            format!("{line} '{value}'")
        }
    }
}

/// The symbols declared directly in one block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolTable {
    locals: HashMap<String, SymbolId>,
    parent: Option<ScopeId>,
}

/// Arena of all symbol tables and symbols of a program.
///
/// Every block owns one table, addressed by [`ScopeId`]. A table refers to the
/// table of the lexically enclosing block by index; lookups walk that chain,
/// declarations only ever touch the local map. Symbols live in the arena
/// behind [`SymbolId`] handles, so the parser and the executor can refer to
/// the same storage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scopes {
    tables:  Vec<SymbolTable>,
    symbols: Vec<Symbol>,
}

impl Scopes {
    /// Creates an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new, empty table whose lookups fall back to `parent`.
    pub fn open(&mut self, parent: Option<ScopeId>) -> ScopeId {
        self.tables.push(SymbolTable { locals: HashMap::new(),
                                       parent });
        ScopeId(self.tables.len() - 1)
    }

    /// Returns `true` if `scope` names a table of this arena.
    #[must_use]
    pub const fn contains(&self, scope: ScopeId) -> bool {
        scope.0 < self.tables.len()
    }

    /// The table of the enclosing block, if any.
    #[must_use]
    pub fn parent(&self, scope: ScopeId) -> Option<ScopeId> {
        self.tables[scope.0].parent
    }

    /// Number of enclosing blocks; `0` for the program root.
    #[must_use]
    pub fn depth(&self, scope: ScopeId) -> usize {
        std::iter::successors(self.parent(scope), |s| self.parent(*s)).count()
    }

    /// Declares `symbol` in the local table of `scope`.
    ///
    /// An existing local entry of the same name is replaced; callers check
    /// [`Scopes::get_local`] first to reject redeclarations. Entries of the
    /// same name in enclosing tables are shadowed, not touched.
    ///
    /// # Example
    /// ```
    /// use kab::interpreter::{scope::{Scopes, Symbol}, value::DataKind};
    ///
    /// let mut scopes = Scopes::new();
    /// let outer = scopes.open(None);
    /// let inner = scopes.open(Some(outer));
    ///
    /// let outer_x = scopes.add(outer, Symbol::new("x", DataKind::Numeric));
    /// let inner_x = scopes.add(inner, Symbol::new("x", DataKind::Textual));
    ///
    /// assert_eq!(scopes.get(inner, "x"), Some(inner_x));
    /// assert_eq!(scopes.get(outer, "x"), Some(outer_x));
    /// ```
    pub fn add(&mut self, scope: ScopeId, symbol: Symbol) -> SymbolId {
        let id = SymbolId(self.symbols.len());
        let name = symbol.name.clone();
        self.symbols.push(symbol);
        self.tables[scope.0].locals.insert(name, id);
        id
    }

    /// Looks `name` up in the local table of `scope` only.
    #[must_use]
    pub fn get_local(&self, scope: ScopeId, name: &str) -> Option<SymbolId> {
        self.tables[scope.0].locals.get(name).copied()
    }

    /// Looks `name` up in `scope`, then in each enclosing table in turn.
    #[must_use]
    pub fn get(&self, scope: ScopeId, name: &str) -> Option<SymbolId> {
        std::iter::successors(Some(scope), |s| self.parent(*s)).find_map(|s| self.get_local(s, name))
    }

    /// Removes `name` from the local table of `scope`.
    ///
    /// Returns `true` if the name was declared there. The symbol's storage
    /// stays valid for handles that still refer to it.
    pub fn delete(&mut self, scope: ScopeId, name: &str) -> bool {
        self.tables[scope.0].locals.remove(name).is_some()
    }

    /// Returns `true` if `symbol` is what its name resolves to in some table
    /// of the chain starting at `scope`.
    #[must_use]
    pub fn is_visible(&self, scope: ScopeId, symbol: SymbolId) -> bool {
        let name = &self.symbols[symbol.0].name;
        std::iter::successors(Some(scope), |s| self.parent(*s)).any(|s| {
                                                                    self.get_local(s, name)
                                                                    == Some(symbol)
                                                                })
    }

    /// The symbol behind a handle.
    #[must_use]
    pub fn symbol(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.0]
    }

    /// Mutable access to the symbol behind a handle.
    pub fn symbol_mut(&mut self, id: SymbolId) -> &mut Symbol {
        &mut self.symbols[id.0]
    }

    /// The symbols declared directly in `scope`, sorted by name.
    pub fn locals(&self, scope: ScopeId) -> impl Iterator<Item = &Symbol> {
        let mut ids: Vec<_> = self.tables[scope.0].locals.values().copied().collect();
        ids.sort_by(|a, b| self.symbols[a.0].name.cmp(&self.symbols[b.0].name));
        ids.into_iter().map(|id| &self.symbols[id.0])
    }

    /// All tables, in creation order (parents before children).
    pub fn scopes(&self) -> impl Iterator<Item = ScopeId> {
        (0..self.tables.len()).map(ScopeId)
    }

    /// Renders every table with its symbols in fixed-width columns.
    ///
    /// # Example
    /// ```
    /// use kab::interpreter::{scope::{Scopes, Symbol}, value::DataKind};
    ///
    /// let mut scopes = Scopes::new();
    /// let root = scopes.open(None);
    /// scopes.add(root, Symbol::new("count", DataKind::Numeric));
    ///
    /// let dump = scopes.dump();
    /// assert!(dump.starts_with("Symbols:\n  Block 0\n"));
    /// assert!(dump.contains("Symbol: count                 number       '0'"));
    /// ```
    #[must_use]
    pub fn dump(&self) -> String {
        let mut out = String::from("Symbols:\n");

        for scope in self.scopes() {
            let indent = "  ".repeat(self.depth(scope) + 1);
            let _ = writeln!(out, "{indent}Block {}", scope.0);
            for symbol in self.locals(scope) {
                let _ = writeln!(out, "{indent}  {}", symbol.describe());
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::value::Number;

    #[test]
    fn lookup_walks_the_parent_chain() {
        let mut scopes = Scopes::new();
        let root = scopes.open(None);
        let middle = scopes.open(Some(root));
        let leaf = scopes.open(Some(middle));

        let total = scopes.add(root, Symbol::new("total", DataKind::Numeric));

        assert_eq!(scopes.get(leaf, "total"), Some(total));
        assert_eq!(scopes.get_local(leaf, "total"), None);
        assert_eq!(scopes.get(leaf, "missing"), None);
        assert_eq!(scopes.depth(leaf), 2);
    }

    #[test]
    fn shadowing_leaves_the_outer_symbol_alone() {
        let mut scopes = Scopes::new();
        let outer = scopes.open(None);
        let inner = scopes.open(Some(outer));

        let outer_x = scopes.add(outer, Symbol::new("x", DataKind::Numeric));
        let inner_x = scopes.add(inner, Symbol::new("x", DataKind::Textual));
        scopes.symbol_mut(inner_x).value = Value::from("inner");

        assert_eq!(scopes.symbol(scopes.get(inner, "x").unwrap()).kind, DataKind::Textual);
        assert_eq!(scopes.symbol(outer_x).value, Value::from(Number::from(0)));
        assert!(scopes.is_visible(inner, outer_x));
        assert!(!scopes.is_visible(outer, inner_x));
    }

    #[test]
    fn sibling_tables_are_independent() {
        let mut scopes = Scopes::new();
        let root = scopes.open(None);
        let first = scopes.open(Some(root));
        let second = scopes.open(Some(root));

        scopes.add(first, Symbol::new("x", DataKind::Numeric));

        assert!(scopes.get_local(first, "x").is_some());
        assert!(scopes.get(second, "x").is_none());
    }

    #[test]
    fn delete_only_touches_the_local_table() {
        let mut scopes = Scopes::new();
        let outer = scopes.open(None);
        let inner = scopes.open(Some(outer));
        let outer_x = scopes.add(outer, Symbol::new("x", DataKind::Numeric));
        scopes.add(inner, Symbol::new("x", DataKind::Numeric));

        assert!(scopes.delete(inner, "x"));
        assert!(!scopes.delete(inner, "x"));
        assert_eq!(scopes.get(inner, "x"), Some(outer_x));
    }

    #[test]
    fn add_overwrites_local_entries() {
        let mut scopes = Scopes::new();
        let root = scopes.open(None);
        scopes.add(root, Symbol::new("x", DataKind::Numeric));
        let second = scopes.add(root, Symbol::new("x", DataKind::Textual));

        assert_eq!(scopes.get_local(root, "x"), Some(second));
        assert_eq!(scopes.locals(root).count(), 1);
    }
}
