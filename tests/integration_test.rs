// Integration tests for the simulated console

use sprout::config::{Config, EngineConfig};
use sprout::interpreter::{ExecutionState, PendingRead, Status};
use sprout::memory::Value;
use sprout::{run, tokenize};

fn start(source: &str) -> ExecutionState {
    let program = tokenize(source).expect("Tokenizing failed");
    run(&program, &Config::default())
}

#[test]
fn test_hello_world() {
    let state = start(
        r#"
        #include <iostream>
        using namespace std;

        int main() {
            cout << "Hello" << endl;
            return 0;
        }
    "#,
    );

    assert!(!state.is_running());
    assert!(state.pending_read().is_none());
    assert!(state.console().program_text().ends_with("Hello\n"));
    assert_eq!(state.output(), "Hello\nProgram finished, exit code 0\n");
}

#[test]
fn test_read_then_print() {
    let mut state = start(
        r#"
        int main() {
            int x;
            cin >> x;
            cout << x << endl;
        }
    "#,
    );

    assert_eq!(state.status(), Some(Status::AwaitingInput));
    assert_eq!(
        state.pending_read(),
        Some(&PendingRead::Single {
            variable: "x".into(),
            mode: sprout::parser::ast::ReadMode::Stream,
        })
    );
    assert_eq!(state.current_location().line, 4);

    assert_eq!(state.supply_input("5"), Ok(Status::Finished));
    assert_eq!(state.console().program_text(), "5\n5\n");
}

#[test]
fn test_loop_runs_three_times() {
    let state = start(
        r#"
        int main() {
            for (int i = 0; i < 3; i++) {
                cout << i << endl;
            }
        }
    "#,
    );

    assert_eq!(state.console().program_text(), "0\n1\n2\n");
    assert_eq!(state.variables().get("i"), Some(&Value::Int(3)));
}

#[test]
fn test_loop_never_entered() {
    let state = start(
        r#"
        int main() {
            for (int i = 0; i < 0; i++) {
                cout << i << endl;
            }
        }
    "#,
    );

    assert_eq!(state.console().program_text(), "");
    assert_eq!(state.output(), "Program finished with no output\n");
}

#[test]
fn test_reruns_are_independent() {
    let source = r#"
        int main() {
            string name;
            cout << "Name: ";
            cin >> name;
            cout << "Hi " << name << endl;
        }
    "#;
    let program = tokenize(source).unwrap();

    let mut first = ExecutionState::start(&program, EngineConfig::default());
    let mut second = ExecutionState::start(&program, EngineConfig::default());
    first.resume();
    second.resume();

    first.supply_input("Ada").unwrap();
    assert!(second.is_awaiting_input());
    assert!(second.variables().is_empty());

    second.supply_input("Ada").unwrap();
    assert_eq!(first.output(), second.output());
    assert_eq!(first.console().program_text(), "Name:  Ada\nHi Ada\n");
}

#[test]
fn test_missing_main_is_structural() {
    let result = tokenize("int helper() {\n  cout << 1;\n}\n");
    assert_eq!(result, Err(sprout::StructuralError::MissingEntryPoint));
}

#[test]
fn test_undefined_variable_prints_marker() {
    let state = start("int main() {\n  cout << y << endl;\n}\n");

    assert_eq!(state.status(), Some(Status::Finished));
    assert_eq!(state.console().program_text(), "[undefined]\n");
}

#[test]
fn test_scanf_two_values() {
    let source = r#"
        int main() {
            int a, b;
            scanf("%d %d", &a, &b);
            cout << a << "+" << b << endl;
        }
    "#;

    let mut state = start(source);
    assert_eq!(
        state.pending_read().map(PendingRead::prompt).as_deref(),
        Some("enter a, b (integer integer)")
    );
    assert_eq!(state.supply_input("3 4"), Ok(Status::Finished));
    assert_eq!(state.variables().get("a"), Some(&Value::Int(3)));
    assert!(state.console().program_text().ends_with("3+4\n"));

    let mut state = start(source);
    assert_eq!(state.supply_input("3"), Ok(Status::AwaitingInput));
    assert_eq!(state.pending_read().map(PendingRead::variables), Some(vec!["b"]));
    assert_eq!(state.supply_input("9"), Ok(Status::Finished));
    assert!(state.console().program_text().ends_with("3+9\n"));
}

#[test]
fn test_nested_loops() {
    let state = start(
        r#"
        int main() {
            for (int i = 0; i < 2; i++) {
                for (int j = 0; j < 3; j++) {
                    cout << j;
                }
                cout << endl;
            }
        }
    "#,
    );

    assert_eq!(state.console().program_text(), "0 1 2 \n0 1 2 \n");
}

#[test]
fn test_loop_bound_from_input() {
    let mut state = start(
        r#"
        int main() {
            int n;
            cout << "How many? ";
            cin >> n;
            for (int i = 1; i <= n; i++) {
                cout << "star" << endl;
            }
        }
    "#,
    );

    assert_eq!(state.supply_input(" 2 "), Ok(Status::Finished));
    assert_eq!(state.console().program_text(), "How many?  2\nstar\nstar\n");
}

#[test]
fn test_read_inside_loop_suspends_each_pass() {
    let mut state = start(
        r#"
        int main() {
            for (int i = 0; i < 3; i++) {
                cin >> x;
                cout << x << endl;
            }
        }
    "#,
    );

    assert_eq!(state.supply_input("a"), Ok(Status::AwaitingInput));
    assert_eq!(state.loop_stack().len(), 1);
    assert_eq!(state.supply_input("b"), Ok(Status::AwaitingInput));
    assert_eq!(state.supply_input("c"), Ok(Status::Finished));
    assert_eq!(state.console().program_text(), "a\na\nb\nb\nc\nc\n");
}

#[test]
fn test_step_guard() {
    let state = start("int main() {\n  for (i = 0; i >= 0; i++) {\n  }\n}\n");

    assert_eq!(state.status(), Some(Status::Halted));
    // Reported at the loop's closing brace, where the run was stopped
    assert!(state
        .output()
        .contains("Runtime error (line 3): too many steps (100000)"));
}

#[test]
fn test_unbounded_loop_that_terminates() {
    let program = tokenize("int main() {\n  for (i = 0; i < 200000; i++) {\n  }\n}\n").unwrap();
    let config = Config {
        engine: EngineConfig {
            max_steps: None,
            ..EngineConfig::default()
        },
        ..Config::default()
    };

    let state = run(&program, &config);
    assert_eq!(state.status(), Some(Status::Finished));
    assert_eq!(state.variables().get("i"), Some(&Value::Int(200000)));
}

#[test]
fn test_non_numeric_bound_is_false() {
    let mut state = start(
        r#"
        int main() {
            cin >> n;
            for (int i = 0; i < n; i++) {
                cout << i;
            }
            cout << "done" << endl;
        }
    "#,
    );

    assert_eq!(state.supply_input("lots"), Ok(Status::Finished));
    assert_eq!(state.console().program_text(), "lots\ndone\n");
}

#[test]
fn test_getline_and_getchar() {
    let mut state = start(
        r#"
        int main() {
            string line;
            getline(cin, line);
            char c = getchar();
            cout << line << "/" << c << endl;
        }
    "#,
    );

    assert_eq!(
        state.pending_read().map(PendingRead::prompt).as_deref(),
        Some("enter a line for line")
    );
    state.supply_input("two words").unwrap();
    assert_eq!(
        state.pending_read().map(PendingRead::prompt).as_deref(),
        Some("enter a character for c")
    );
    state.supply_input("zebra").unwrap();
    assert!(state.console().program_text().ends_with("two words/z\n"));
}
