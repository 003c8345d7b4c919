//! Builds the flow of a small loop and prints its textual rendering.
//!
//! ```text
//! cargo run --example print_flow
//! ```

use javacfg::render::render;
use javacfg::test_utils::{block, brk, cont, expr, for_stmt, if_stmt};
use javacfg::ControlFlowBuilder;

fn main() {
    // for (int a = 3, b = 5; a < 99; a++, b++) {
    //     if (a == 1) { continue; }
    //     if (a == 2) { break; }
    // }
    let body = block(
        1,
        vec![for_stmt(
            2,
            vec![expr(2, 10, "int a = 3"), expr(2, 19, "b = 5")],
            Some(expr(2, 28, "a < 99")),
            vec![expr(2, 36, "a++"), expr(2, 41, "b++")],
            block(
                2,
                vec![
                    if_stmt(3, expr(3, 13, "a == 1"), block(3, vec![cont(4)])),
                    if_stmt(6, expr(6, 13, "a == 2"), block(6, vec![brk(7)])),
                ],
            ),
        )],
    );

    let graph = ControlFlowBuilder::new().build(&body);
    print!("{}", render(&graph));
}
