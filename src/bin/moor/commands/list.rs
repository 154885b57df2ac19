//! `moor list` command

use std::collections::HashSet;

use anyhow::Result;

use super::{finish, project_context};
use crate::cli::{GlobalArgs, ListArgs};
use moor::core::DependencyGraph;
use moor::ops::resolve;
use moor::{Diagnostics, ImportSpec};

pub fn execute(global: &GlobalArgs, args: ListArgs) -> Result<()> {
    let (ctx, project_dir) = project_context(global, args.path.as_deref())?;
    let mut diag = Diagnostics::new();

    let resolution = resolve(&ctx, &project_dir, &mut diag);

    if let Some(root) = resolution.graph.root_name() {
        let mut seen = HashSet::new();
        print_tree(
            &resolution.graph,
            root,
            None,
            0,
            args.depth.unwrap_or(usize::MAX),
            &mut seen,
        );
    }

    finish("list", &diag)
}

fn print_tree<'a>(
    graph: &'a DependencyGraph,
    name: &'a str,
    spec: Option<&ImportSpec>,
    depth: usize,
    max_depth: usize,
    seen: &mut HashSet<&'a str>,
) {
    if depth > max_depth {
        return;
    }

    let is_duplicate = !seen.insert(name);
    let deps = graph.get(name);

    let prefix = if depth == 0 {
        String::new()
    } else {
        format!("{}├── ", "│   ".repeat(depth - 1))
    };

    let origin = match spec {
        Some(spec) => format!(" ({}#{})", spec.git, spec.branch),
        None => String::new(),
    };

    let marker = if deps.is_none() {
        " (missing)"
    } else if is_duplicate {
        " (*)"
    } else {
        ""
    };

    println!("{}{}{}{}", prefix, name, origin, marker);

    // Each project is expanded once, which also ends cycles
    let Some(deps) = deps else {
        return;
    };
    if is_duplicate {
        return;
    }

    for (dep_name, dep_spec) in &deps.imports {
        print_tree(
            graph,
            dep_name,
            Some(dep_spec),
            depth + 1,
            max_depth,
            seen,
        );
    }
}
