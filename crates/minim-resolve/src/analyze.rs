//! The name-analysis pass.
//!
//! A depth-first walk over the AST that treats the scope table as a stack
//! mirroring lexical block structure. Declarations add symbols, references
//! resolve them, and every error is recorded without stopping the walk, so
//! one run surfaces every independent naming error in the program.

use fxhash::FxHashMap;
use log::debug;

use minim_syntax::ast::{
    Block, CallExpr, Decl, Expr, ExprKind, FormalDecl, FuncDecl, Ident, NodeId, Program, Stmt,
    StmtKind, StructDecl, TypeKind, VarDecl,
};

use crate::error::NameError;
use crate::symbol::{Symbol, SymbolArena, SymbolId};
use crate::table::{ScopeError, ScopeTable};

/// Everything name analysis produces for one program.
#[derive(Debug)]
pub struct NameResolution {
    symbols: SymbolArena,
    bindings: FxHashMap<NodeId, SymbolId>,
    errors: Vec<NameError>,
    ok: bool,
}

impl NameResolution {
    /// True when the pass recorded no fatal error. Downstream phases must
    /// check this and skip their work when it is false.
    pub fn ok(&self) -> bool {
        self.ok
    }

    pub fn errors(&self) -> &[NameError] {
        &self.errors
    }

    pub fn symbols(&self) -> &SymbolArena {
        &self.symbols
    }

    /// The symbol bound to an identifier occurrence, if resolution of that
    /// occurrence succeeded.
    pub fn binding(&self, id: NodeId) -> Option<SymbolId> {
        self.bindings.get(&id).copied()
    }

    pub fn symbol_of(&self, id: NodeId) -> Option<&Symbol> {
        self.binding(id).map(|sym| &self.symbols[sym])
    }

    /// An annotation callback for [`minim_syntax::unparse_annotated`]:
    /// resolved occurrences render as `name{display-form}`.
    pub fn annotator(&self) -> impl Fn(NodeId) -> Option<String> + '_ {
        move |id| self.symbol_of(id).map(|sym| sym.to_string())
    }
}

/// Run name analysis over `program` with a fresh global scope table.
pub fn analyze_names(program: &Program) -> NameResolution {
    let mut analyzer = NameAnalyzer::default();
    let mut table = ScopeTable::new();
    let mut ok = true;
    for decl in &program.decls {
        ok &= analyzer.decl(decl, &mut table);
    }
    debug!(
        "name analysis finished: {} symbols, {} errors",
        analyzer.symbols.len(),
        analyzer.errors.len()
    );
    NameResolution {
        symbols: analyzer.symbols,
        bindings: analyzer.bindings,
        errors: analyzer.errors,
        ok,
    }
}

#[derive(Default)]
struct NameAnalyzer {
    symbols: SymbolArena,
    bindings: FxHashMap<NodeId, SymbolId>,
    errors: Vec<NameError>,
}

impl NameAnalyzer {
    fn report(&mut self, error: NameError) {
        self.errors.push(error);
    }

    /// Record the resolved symbol for one identifier occurrence.
    /// Each occurrence is resolved at most once per run.
    fn bind(&mut self, id: &Ident, symbol: SymbolId) {
        let previous = self.bindings.insert(id.id, symbol);
        assert!(previous.is_none(), "identifier occurrence resolved twice");
    }

    /// Declare `name` in the current scope, mapping a duplicate to the
    /// user-facing error. Returns false when the declaration was dropped.
    fn declare(&mut self, table: &mut ScopeTable, name: &Ident, symbol: SymbolId) -> bool {
        match table.declare(&name.name, symbol) {
            Ok(()) => true,
            Err(ScopeError::Duplicate) => {
                self.report(NameError::MultiplyDeclaredName {
                    name: name.name.clone(),
                    span: name.span.into(),
                });
                false
            }
            Err(error) => unreachable!("scope table misuse during declaration: {error}"),
        }
    }

    fn decl(&mut self, decl: &Decl, table: &mut ScopeTable) -> bool {
        match decl {
            Decl::Var(decl) => self.var_decl(decl, table),
            Decl::Func(decl) => self.func_decl(decl, table),
            Decl::Struct(decl) => self.struct_decl(decl, table),
        }
    }

    fn var_decl(&mut self, decl: &VarDecl, table: &mut ScopeTable) -> bool {
        let symbol = match &decl.ty.kind {
            TypeKind::Void => {
                self.report(NameError::VoidVariable {
                    name: decl.name.name.clone(),
                    span: decl.name.span.into(),
                });
                return false;
            }
            TypeKind::Struct(type_name) => {
                // The struct type must already be visible in the table this
                // declaration is analyzed against.
                match lookup_global(table, &type_name.name) {
                    Some(def) if self.symbols[def].is_struct_def() => Symbol::StructVar {
                        type_name: type_name.name.clone(),
                        def,
                    },
                    _ => {
                        self.report(NameError::UnknownStructType {
                            name: type_name.name.clone(),
                            span: type_name.span.into(),
                        });
                        return false;
                    }
                }
            }
            _ => Symbol::Plain { type_name: decl.ty.label().to_string() },
        };
        let symbol = self.symbols.alloc(symbol);
        self.declare(table, &decl.name, symbol)
    }

    fn func_decl(&mut self, decl: &FuncDecl, table: &mut ScopeTable) -> bool {
        let mut ok = true;

        // Pre-check the enclosing scope so a duplicate produces exactly one
        // error here and no second error from the declare below.
        let duplicate = lookup_local(table, &decl.name.name).is_some();
        if duplicate {
            self.report(NameError::MultiplyDeclaredName {
                name: decl.name.name.clone(),
                span: decl.name.span.into(),
            });
            ok = false;
        }

        let param_types = decl
            .formals
            .iter()
            .map(|formal| formal.ty.label().to_string())
            .collect();
        let symbol = self.symbols.alloc(Symbol::Function {
            return_type: decl.return_ty.label().to_string(),
            param_types,
        });
        if !duplicate {
            ok &= self.declare(table, &decl.name, symbol);
        }

        // The body scope opens and closes regardless of earlier errors so
        // nested analysis always sees the correct nesting. Formals and the
        // body's locals share this one scope.
        table.push_scope();
        for formal in &decl.formals {
            ok &= self.formal_decl(formal, table);
        }
        ok &= self.block_items(&decl.body, table);
        pop_scope(table);

        ok
    }

    fn formal_decl(&mut self, decl: &FormalDecl, table: &mut ScopeTable) -> bool {
        if decl.ty.is_void() {
            self.report(NameError::VoidVariable {
                name: decl.name.name.clone(),
                span: decl.name.span.into(),
            });
            return false;
        }
        let symbol = self
            .symbols
            .alloc(Symbol::Plain { type_name: decl.ty.label().to_string() });
        self.declare(table, &decl.name, symbol)
    }

    fn struct_decl(&mut self, decl: &StructDecl, table: &mut ScopeTable) -> bool {
        if lookup_local(table, &decl.name.name).is_some() {
            self.report(NameError::MultiplyDeclaredName {
                name: decl.name.name.clone(),
                span: decl.name.span.into(),
            });
            // Fields of a broken struct are not processed.
            return false;
        }

        // Fields live in their own throwaway table; duplicates are local to
        // the struct and the fields never leak into ordinary lookup.
        let mut fields = ScopeTable::new();
        let mut ok = true;
        for field in &decl.fields {
            ok &= self.var_decl(field, &mut fields);
        }

        let symbol = self.symbols.alloc(Symbol::StructDef { fields });
        ok &= self.declare(table, &decl.name, symbol);
        ok
    }

    /// Local declarations then statements, in the current scope.
    fn block_items(&mut self, block: &Block, table: &mut ScopeTable) -> bool {
        let mut ok = true;
        for decl in &block.decls {
            ok &= self.decl(decl, table);
        }
        for stmt in &block.stmts {
            ok &= self.stmt(stmt, table);
        }
        ok
    }

    /// A block body in its own scope (if/else branches, while bodies).
    fn scoped_block(&mut self, block: &Block, table: &mut ScopeTable) -> bool {
        table.push_scope();
        let ok = self.block_items(block, table);
        pop_scope(table);
        ok
    }

    fn stmt(&mut self, stmt: &Stmt, table: &mut ScopeTable) -> bool {
        match &stmt.kind {
            StmtKind::Assign { target, value } => {
                let target_ok = self.expr(target, table);
                let value_ok = self.expr(value, table);
                target_ok && value_ok
            }
            StmtKind::PostInc(target) | StmtKind::PostDec(target) => self.expr(target, table),
            StmtKind::If { cond, then_block, else_block } => {
                // The condition is resolved in the surrounding scope; it
                // must not see the branch scopes. Each branch gets its own
                // scope, so a name declared in one is invisible in the
                // other.
                let mut ok = self.expr(cond, table);
                ok &= self.scoped_block(then_block, table);
                if let Some(else_block) = else_block {
                    ok &= self.scoped_block(else_block, table);
                }
                ok
            }
            StmtKind::While { cond, body } => {
                let mut ok = self.expr(cond, table);
                ok &= self.scoped_block(body, table);
                ok
            }
            StmtKind::Read(target) => self.expr(target, table),
            StmtKind::Write(value) => self.expr(value, table),
            StmtKind::Call(call) => self.call(call, table),
            StmtKind::Return(value) => match value {
                Some(value) => self.expr(value, table),
                None => true,
            },
        }
    }

    fn expr(&mut self, expr: &Expr, table: &mut ScopeTable) -> bool {
        match &expr.kind {
            ExprKind::True | ExprKind::False | ExprKind::IntLit(_) | ExprKind::StrLit(_) => true,
            ExprKind::Ident(id) => self.ident_ref(id, table),
            ExprKind::StructAccess { base, field } => self.struct_access(base, field, table),
            ExprKind::Assign { target, value } => {
                let target_ok = self.expr(target, table);
                let value_ok = self.expr(value, table);
                target_ok && value_ok
            }
            ExprKind::Call(call) => self.call(call, table),
            ExprKind::Unary { operand, .. } => self.expr(operand, table),
            ExprKind::Binary { lhs, rhs, .. } => {
                let lhs_ok = self.expr(lhs, table);
                let rhs_ok = self.expr(rhs, table);
                lhs_ok && rhs_ok
            }
        }
    }

    fn ident_ref(&mut self, id: &Ident, table: &ScopeTable) -> bool {
        match lookup_global(table, &id.name) {
            Some(symbol) => {
                self.bind(id, symbol);
                true
            }
            None => {
                self.report(NameError::UndeclaredName {
                    name: id.name.clone(),
                    span: id.span.into(),
                });
                false
            }
        }
    }

    fn call(&mut self, call: &CallExpr, table: &mut ScopeTable) -> bool {
        // Undeclared callee and non-function callee are mutually exclusive
        // per call site.
        let mut ok = true;
        match lookup_global(table, &call.callee.name) {
            None => {
                self.report(NameError::UndeclaredName {
                    name: call.callee.name.clone(),
                    span: call.callee.span.into(),
                });
                ok = false;
            }
            Some(symbol) => {
                self.bind(&call.callee, symbol);
                if !self.symbols[symbol].is_function() {
                    self.report(NameError::NotAFunction {
                        name: call.callee.name.clone(),
                        span: call.callee.span.into(),
                    });
                    ok = false;
                }
            }
        }
        // Arguments are analyzed either way so their errors still surface.
        for arg in &call.args {
            ok &= self.expr(arg, table);
        }
        ok
    }

    fn struct_access(&mut self, base: &Expr, field: &Ident, table: &mut ScopeTable) -> bool {
        let ok = self.expr(base, table);

        // The left side must be an identifier or another `:` access; its
        // resolved symbol must be a struct variable.
        let lhs = match &base.kind {
            ExprKind::Ident(id) => Some((self.bindings.get(&id.id).copied(), id.span)),
            ExprKind::StructAccess { field: inner, .. } => {
                Some((self.bindings.get(&inner.id).copied(), inner.span))
            }
            _ => None,
        };
        let (lhs_symbol, lhs_span) = match lhs {
            Some(found) => found,
            None => {
                self.report(NameError::InvalidStructAccess { span: field.span.into() });
                return false;
            }
        };
        let (def, struct_name) = match lhs_symbol.map(|sym| &self.symbols[sym]) {
            Some(Symbol::StructVar { def, type_name }) => (*def, type_name.clone()),
            _ => {
                self.report(NameError::InvalidStructAccess { span: lhs_span.into() });
                return false;
            }
        };

        // Fields are found only in the definition's private table; the
        // search never continues outward.
        let field_symbol = match &self.symbols[def] {
            Symbol::StructDef { fields } => lookup_local(fields, &field.name),
            _ => unreachable!("struct variable must reference a struct definition"),
        };
        match field_symbol {
            Some(symbol) => {
                self.bind(field, symbol);
                ok
            }
            None => {
                self.report(NameError::UnknownStructField {
                    name: field.name.clone(),
                    struct_name,
                    span: field.span.into(),
                });
                false
            }
        }
    }
}

// The pass keeps push/pop balanced against a table that always has its
// global scope, so these operations cannot fail while it runs; a failure
// is a logic bug, not a user error.

fn lookup_global(table: &ScopeTable, name: &str) -> Option<SymbolId> {
    table
        .lookup_global(name)
        .expect("scope table always has its global scope during analysis")
}

fn lookup_local(table: &ScopeTable, name: &str) -> Option<SymbolId> {
    table
        .lookup_local(name)
        .expect("scope table always has its global scope during analysis")
}

fn pop_scope(table: &mut ScopeTable) {
    table
        .pop_scope()
        .expect("scope pushes and pops stay balanced during analysis");
}
