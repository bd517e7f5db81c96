use std::path::{Path, PathBuf};

use repack_common::{
    file_provider::FileProvider, Code, CodeId, CompileContext, FxIndexMap, FxIndexSet,
};
use repack_error::{AssetKind, BuildError, Diagnostic, Diagnostics, Outcome};
use repack_parser::{parse_source, tree_analyzer, NodeId, NodeType, SyntaxTree, Token};
use tracing::{debug, info};

use crate::{
    interpolate, CopyFromTo, MatchPredicate, PackFile, Predicate, PredicateType, SimplePredicate,
    Variable, Variables, Workspace,
};

/// Builds a [`Workspace`] from every source file below a root directory
pub struct WorkspaceBuilder<'ctx, F> {
    ctx: &'ctx mut CompileContext,
    provider: F,
    root: PathBuf,
}

/// A source file that passed the front end
struct ParsedFile {
    path: PathBuf,
    code: CodeId,
    tree: SyntaxTree,
}

impl<'ctx, F: FileProvider> WorkspaceBuilder<'ctx, F> {
    pub fn new(ctx: &'ctx mut CompileContext, provider: F, root: impl Into<PathBuf>) -> Self {
        WorkspaceBuilder {
            ctx,
            provider,
            root: root.into(),
        }
    }

    /// Resolves the whole workspace.
    ///
    /// Every file is checked, even if an earlier one failed. The returned workspace is
    /// `None` if any error was reported.
    pub fn build(self) -> Outcome<Option<Workspace>> {
        let mut diagnostics = Diagnostics::default();
        let workspace = self.build_inner(&mut diagnostics);
        let workspace = workspace.filter(|_| !diagnostics.has_errors());
        Outcome::new(workspace, diagnostics)
    }

    fn build_inner(mut self, diagnostics: &mut Diagnostics) -> Option<Workspace> {
        let extension = self.ctx.config.source_extension.clone();
        let sources = match self.provider.source_files(&self.root, &extension) {
            Ok(sources) => sources,
            Err(err) => {
                diagnostics.push(Diagnostic::new(
                    BuildError::InvalidInputDirectory {
                        path: self.root.clone(),
                        message: err.to_string(),
                    },
                    None,
                ));
                return None;
            }
        };

        if sources.is_empty() {
            info!("No .{extension} files found in '{}'", self.root.display());
            return Some(Workspace::empty(self.root));
        }
        info!("Found {} source files", sources.len());

        let parsed = self.parse_files(sources, diagnostics);
        if diagnostics.has_errors() {
            return None;
        }

        let resolver = Resolver {
            provider: &self.provider,
            root: &self.root,
        };
        let (globals, locals) = collect_variables(&parsed, diagnostics);

        let files = parsed
            .into_iter()
            .zip(locals)
            .map(|(file, variables)| {
                let scopes = Scopes {
                    local: &variables,
                    global: &globals,
                };
                let predicates = resolver.convert_file(&file.tree, &scopes, diagnostics);
                debug!(
                    "Resolved {} top level predicates in '{}'",
                    predicates.len(),
                    file.path.display()
                );
                PackFile {
                    path: file.path,
                    code: file.code,
                    root: self.root.clone(),
                    variables,
                    predicates,
                }
            })
            .collect();

        Some(Workspace {
            files,
            globals,
            root: self.root,
        })
    }

    /// Reads, parses and analyzes every file. Files that fail are skipped.
    fn parse_files(&mut self, sources: Vec<PathBuf>, diagnostics: &mut Diagnostics) -> Vec<ParsedFile> {
        let mut parsed = Vec::with_capacity(sources.len());
        for path in sources {
            debug!("Parsing '{}'", path.display());
            let Some(source) = self.provider.read_file(&path) else {
                diagnostics.push(Diagnostic::new(
                    BuildError::UnreadableFile {
                        path,
                        message: "the file could not be opened".to_string(),
                    },
                    None,
                ));
                continue;
            };

            let code = self.ctx.add_input_file(Code {
                source: source.into(),
                path: Some(path.clone()),
            });
            let tree = match parse_source(&self.ctx.get_input_file(code).source, Some(code)) {
                Ok(tree) => tree,
                Err(diagnostic) => {
                    diagnostics.push(diagnostic);
                    continue;
                }
            };

            let analyzed = tree_analyzer::analyze(&tree);
            if analyzed.has_errors() {
                diagnostics.extend(analyzed);
                continue;
            }

            parsed.push(ParsedFile { path, code, tree });
        }
        parsed
    }
}

/// The variables visible from a file
struct Scopes<'v> {
    local: &'v Variables,
    global: &'v Variables,
}

impl<'v> Scopes<'v> {
    fn lookup(&self, name: &str) -> Option<&'v str> {
        self.local
            .get(name)
            .or_else(|| self.global.get(name))
            .map(|variable| variable.value.as_str())
    }

    /// Interpolates the value of a string literal token
    fn resolve(&self, token: &Token, diagnostics: &mut Diagnostics) -> String {
        let interpolated = interpolate(&token.string_value(), |name| self.lookup(name));
        for name in interpolated.unresolved {
            diagnostics.push(Diagnostic::at(
                BuildError::UnresolvedVariable { name },
                token.location(),
            ));
        }
        interpolated.value
    }
}

struct Resolver<'a, F> {
    provider: &'a F,
    root: &'a Path,
}

impl<F: FileProvider> Resolver<'_, F> {
    fn convert_file(
        &self,
        tree: &SyntaxTree,
        scopes: &Scopes,
        diagnostics: &mut Diagnostics,
    ) -> Vec<Predicate> {
        tree.scope_content(tree.root())
            .filter_map(|id| match tree[id].kind {
                NodeType::MatchStatement | NodeType::AnyStatement => Some(Predicate::Match(
                    self.convert_match(tree, id, scopes, diagnostics),
                )),
                NodeType::CopyStatement => {
                    Some(self.convert_copy(tree, id, scopes, diagnostics))
                }
                _ => None,
            })
            .collect()
    }

    fn convert_match(
        &self,
        tree: &SyntaxTree,
        id: NodeId,
        scopes: &Scopes,
        diagnostics: &mut Diagnostics,
    ) -> MatchPredicate {
        let mut conditions = Vec::new();
        let mut predicates = Vec::new();
        let mut weight = 0;

        for child in tree.scope_content(id) {
            let tokens: Vec<_> = tree.leaf_tokens(child).collect();
            match (tree[child].kind, &tokens[..]) {
                (NodeType::PredicateStatement, [key, _, value]) => {
                    conditions.push(SimplePredicate {
                        key: (*key).clone(),
                        value: scopes.resolve(value, diagnostics),
                        kind: PredicateType::Match,
                    });
                }
                (NodeType::WeightStatement, [_, _, value]) => {
                    let text = scopes.resolve(value, diagnostics);
                    match text.parse() {
                        Ok(parsed) => weight = parsed,
                        Err(_) => diagnostics.push(Diagnostic::at(
                            BuildError::InvalidWeight { value: text },
                            value.location(),
                        )),
                    }
                }
                (NodeType::ForStatement, _) => {
                    predicates.extend(self.convert_for(tree, child, scopes, diagnostics));
                }
                _ => {}
            }
        }

        let token = tree
            .first_token(id)
            .cloned()
            .unwrap_or_else(|| Token::synthetic("match"));
        MatchPredicate {
            conditions,
            predicates,
            weight,
            token,
        }
    }

    fn convert_for(
        &self,
        tree: &SyntaxTree,
        id: NodeId,
        scopes: &Scopes,
        diagnostics: &mut Diagnostics,
    ) -> Vec<Predicate> {
        let mut predicates = Vec::new();

        for child in tree.scope_content(id) {
            let kind = tree[child].kind;
            let Some(predicate_type) = PredicateType::of_node(kind) else {
                continue;
            };

            if kind.is_set_all() {
                let tokens: Vec<_> = tree.leaf_tokens(child).collect();
                if let [_, _, value] = tokens[..] {
                    let texture = self.resolve_asset(value, AssetKind::Texture, scopes, diagnostics);
                    predicates.push(Predicate::SetAll {
                        kind: predicate_type,
                        texture,
                        token: value.clone(),
                    });
                }
            } else if kind.is_listing() {
                self.convert_listing(tree, child, predicate_type, scopes, diagnostics, &mut predicates);
            }
        }

        predicates
    }

    fn convert_listing(
        &self,
        tree: &SyntaxTree,
        id: NodeId,
        predicate_type: PredicateType,
        scopes: &Scopes,
        diagnostics: &mut Diagnostics,
        predicates: &mut Vec<Predicate>,
    ) {
        let mut keys = FxIndexSet::default();
        for child in tree.scope_content(id) {
            let tokens: Vec<_> = tree.leaf_tokens(child).collect();
            match (tree[child].kind, &tokens[..]) {
                (NodeType::IdentifierList, identifiers) => {
                    keys.extend(identifiers.iter().map(|token| (*token).clone()));
                }
                (NodeType::PredicateStatement, [key, _, value]) => {
                    let texture = self.resolve_asset(value, AssetKind::Texture, scopes, diagnostics);
                    predicates.push(Predicate::Simple(SimplePredicate {
                        key: (*key).clone(),
                        value: texture,
                        kind: predicate_type,
                    }));
                }
                (NodeType::MapAllPredicate, [_, value]) => {
                    let texture = self.resolve_asset(value, AssetKind::Texture, scopes, diagnostics);
                    predicates.push(Predicate::MapAll {
                        kind: predicate_type,
                        keys: keys.clone(),
                        texture,
                        token: (*value).clone(),
                    });
                }
                (NodeType::ModelStatement, [_, _, value]) => {
                    let model = self.resolve_asset(value, AssetKind::Model, scopes, diagnostics);
                    predicates.push(Predicate::ItemModel {
                        keys: keys.clone(),
                        model,
                        token: (*value).clone(),
                    });
                }
                _ => {}
            }
        }
    }

    fn convert_copy(
        &self,
        tree: &SyntaxTree,
        id: NodeId,
        scopes: &Scopes,
        diagnostics: &mut Diagnostics,
    ) -> Predicate {
        let mut entries = Vec::new();
        for child in tree.scope_content(id) {
            let tokens: Vec<_> = tree.leaf_tokens(child).collect();
            let [from, _, to] = tokens[..] else {
                continue;
            };

            let from_path = scopes.resolve(from, diagnostics);
            if from_path.is_empty() || !self.provider.exists(&self.root.join(&from_path)) {
                diagnostics.push(Diagnostic::at(
                    BuildError::MissingAsset {
                        kind: AssetKind::CopySource,
                        path: from_path.clone(),
                        root: self.root.to_path_buf(),
                    },
                    from.location(),
                ));
            }
            entries.push(CopyFromTo {
                from: from_path,
                to: scopes.resolve(to, diagnostics),
                token: from.clone(),
            });
        }
        Predicate::Copy(entries)
    }

    /// Resolves the path of a texture or model and checks that the file exists.
    ///
    /// The returned path always has the extension of its asset kind.
    fn resolve_asset(
        &self,
        token: &Token,
        kind: AssetKind,
        scopes: &Scopes,
        diagnostics: &mut Diagnostics,
    ) -> String {
        let path = scopes.resolve(token, diagnostics);
        let extension = match kind {
            AssetKind::Texture => "png",
            AssetKind::Model => "json",
            AssetKind::CopySource => return path,
        };

        let with_extension = if Path::new(&path)
            .extension()
            .is_some_and(|ext| ext == extension)
        {
            path.clone()
        } else {
            format!("{path}.{extension}")
        };

        // An empty path would name the workspace root
        let is_file = |candidate: &str| {
            !path.is_empty() && self.provider.is_file(&self.root.join(candidate))
        };
        if is_file(&with_extension) {
            with_extension
        } else if is_file(&path) {
            path
        } else {
            diagnostics.push(Diagnostic::at(
                BuildError::MissingAsset {
                    kind,
                    path,
                    root: self.root.to_path_buf(),
                },
                token.location(),
            ));
            with_extension
        }
    }
}

/// Collects the global and the per file variables.
///
/// Every definition is registered before any value is interpolated, so a value may
/// reference variables defined later or in other files.
fn collect_variables(
    files: &[ParsedFile],
    diagnostics: &mut Diagnostics,
) -> (Variables, Vec<Variables>) {
    let mut collector = VariableCollector::default();
    for (index, file) in files.iter().enumerate() {
        collector.register_file(index, &file.tree, diagnostics);
    }
    collector.finish(diagnostics)
}

/// A `let` or `global` definition whose value is not interpolated yet
struct Definition<'t> {
    name: &'t Token,
    value: &'t Token,
    file: usize,
    global: bool,
}

/// Registers every definition of the workspace, then resolves the values on demand
#[derive(Default)]
struct VariableCollector<'t> {
    definitions: Vec<Definition<'t>>,
    globals: FxIndexMap<&'t str, usize>,
    locals: Vec<FxIndexMap<&'t str, usize>>,
    values: Vec<Option<String>>,
    in_progress: Vec<bool>,
}

impl<'t> VariableCollector<'t> {
    fn register_file(
        &mut self,
        file: usize,
        tree: &'t SyntaxTree,
        diagnostics: &mut Diagnostics,
    ) {
        self.locals.push(FxIndexMap::default());
        for id in tree.scope_content(tree.root()) {
            let kind = tree[id].kind;
            if !matches!(kind, NodeType::LetStatement | NodeType::GlobalStatement) {
                continue;
            }

            let tokens: Vec<_> = tree.leaf_tokens(id).collect();
            let [_, name, _, value] = tokens[..] else {
                continue;
            };

            let global = kind == NodeType::GlobalStatement;
            let scope = if global {
                &mut self.globals
            } else {
                &mut self.locals[file]
            };
            if scope.contains_key(name.text()) {
                diagnostics.push(Diagnostic::at(
                    BuildError::VariableRedefined {
                        name: name.text().to_string(),
                    },
                    name.location(),
                ));
                continue;
            }

            scope.insert(name.text(), self.definitions.len());
            self.definitions.push(Definition {
                name,
                value,
                file,
                global,
            });
        }
    }

    fn lookup(&self, file: usize, name: &str) -> Option<usize> {
        self.locals[file]
            .get(name)
            .or_else(|| self.globals.get(name))
            .copied()
    }

    /// Interpolates the value of a definition, resolving the definitions it references first.
    ///
    /// A reference cycle leaves the variables of the cycle unresolved.
    fn resolve(&mut self, index: usize, diagnostics: &mut Diagnostics) {
        if self.values[index].is_some() || self.in_progress[index] {
            return;
        }
        self.in_progress[index] = true;

        let file = self.definitions[index].file;
        let token = self.definitions[index].value;
        let raw = token.string_value();
        for name in interpolate(&raw, |_| None).unresolved {
            if let Some(dependency) = self.lookup(file, &name) {
                self.resolve(dependency, diagnostics);
            }
        }

        let interpolated = interpolate(&raw, |name| {
            self.lookup(file, name)
                .and_then(|dependency| self.values[dependency].as_deref())
        });
        for name in interpolated.unresolved {
            diagnostics.push(Diagnostic::at(
                BuildError::UnresolvedVariable { name },
                token.location(),
            ));
        }

        self.in_progress[index] = false;
        self.values[index] = Some(interpolated.value);
    }

    fn finish(mut self, diagnostics: &mut Diagnostics) -> (Variables, Vec<Variables>) {
        self.values = vec![None; self.definitions.len()];
        self.in_progress = vec![false; self.definitions.len()];
        for index in 0..self.definitions.len() {
            self.resolve(index, diagnostics);
        }

        let mut globals = Variables::default();
        let mut locals: Vec<_> = self.locals.iter().map(|_| Variables::default()).collect();
        for (definition, value) in self.definitions.into_iter().zip(self.values) {
            let variable = Variable {
                name: definition.name.text().into(),
                value: value.unwrap_or_default(),
                token: definition.name.clone(),
            };
            let scope = if definition.global {
                &mut globals
            } else {
                &mut locals[definition.file]
            };
            // Redefinitions were rejected while registering
            let _ = scope.define(variable);
        }
        (globals, locals)
    }
}

#[cfg(test)]
mod tests;
