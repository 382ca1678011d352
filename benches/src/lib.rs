//! Synthetic sources shared by the benchmarks.

/// A JavaScript module with `functions` small functions, each declaring a
/// handful of variables, a branch and a call.
pub fn generated_javascript(functions: usize) -> String {
    let mut src = String::new();
    for i in 0..functions {
        src.push_str(&format!(
            "function handler{i}(req, res) {{\n  const id = req.params.id + {i};\n  let total = 0;\n  if (id > {i}) {{\n    total = compute(id, \"mode{m}\");\n  }}\n  return res.send(total);\n}}\n",
            m = i % 7
        ));
    }
    src
}
