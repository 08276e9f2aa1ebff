//! 计算器解析器示例
//!
//! 本示例展示了如何使用 combinator-framework 和 text-framework 组合出
//! 一个完整的四则运算表达式解析器。
//!
//! 支持的语法：
//! - 数字（整数和浮点数）
//! - 四则运算：+、-、*、/
//! - 幂运算：^（右结合）
//! - 括号：()
//! - 一元运算符：负号（-5）
//!
//! 用法：
//! ```text
//! calc-parser "3 + 4 * 5" "(1 + 2) * 3" --ast --memoize
//! ```
//! 不传入表达式时使用内置示例。解析失败时输出 `行:列` 形式的错误位置。

use clap::Parser;
use combinator_example::{Calculator, Expr};
use common_framework::line_offset_table;

#[derive(Debug, Parser)]
#[command(
    name = "calc-parser",
    version,
    about = "Parse and evaluate arithmetic expressions."
)]
struct Args {
    /// Expressions to parse; built-in samples are used when none are given.
    exprs: Vec<String>,

    /// Cache operand parses by position while parsing.
    #[arg(long)]
    memoize: bool,

    /// Print the syntax tree of each expression.
    #[arg(long)]
    ast: bool,
}

const SAMPLES: &[&str] = &[
    "3 + 4",
    "2 * 3.14",
    "(1 + 2) * 3",
    "2 ^ 3 ^ 2",
    "10 / 2.5",
    "-5",
    "3 + 4 * 5",
    "3 +",
];

fn main() {
    let args = Args::parse();
    let calculator = Calculator::new().with_memoization(args.memoize);

    let using_samples = args.exprs.is_empty();
    let exprs: Vec<String> = if using_samples {
        SAMPLES.iter().map(|s| s.to_string()).collect()
    } else {
        args.exprs
    };

    println!("=== 计算器解析器示例 ===\n");

    let mut failures = 0;
    for expr in &exprs {
        println!("表达式: {}", expr);
        match calculator.parse(expr) {
            Ok(ast) => {
                println!("  结构: {}", ast);
                println!("  结果: {}", ast.evaluate());
                if args.ast {
                    println!("\n  AST 树形结构:");
                    print_ast_tree(&ast, 2);
                }
            }
            Err(error) => {
                failures += 1;
                let table = line_offset_table(expr.as_str());
                match table.locate(error.offset()) {
                    Ok(location) => eprintln!("  解析失败 {}: {}", location, error),
                    Err(_) => eprintln!("  解析失败: {}", error),
                }
            }
        }
        println!("{}", "-".repeat(50));
    }

    // 内置示例中包含一个故意失败的表达式
    if failures > 0 && !using_samples {
        std::process::exit(1);
    }
}

// 辅助函数：打印 AST 树形结构
fn print_ast_tree(expr: &Expr, indent: usize) {
    let prefix = "  ".repeat(indent);
    match expr {
        Expr::Number { value, .. } => {
            println!("{}Number({})", prefix, value);
        }
        Expr::Binary {
            op, left, right, ..
        } => {
            println!("{}Binary({})", prefix, op.symbol());
            print_ast_tree(left, indent + 1);
            print_ast_tree(right, indent + 1);
        }
        Expr::Unary { operand, .. } => {
            println!("{}Unary(-)", prefix);
            print_ast_tree(operand, indent + 1);
        }
        Expr::Group { expr, .. } => {
            println!("{}Group", prefix);
            print_ast_tree(expr, indent + 1);
        }
    }
}
