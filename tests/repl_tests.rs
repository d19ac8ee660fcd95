//! End-to-end tests of the interactive command loop
//!
//! Commands are fed through stdin; stdout is checked line by line.

mod common;

use common::Workspace;
use predicates::prelude::*;

// ─────────────────────────────────────────────────────────────────
// Full Scenario
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_add_list_remove_then_restart() {
    let ws = Workspace::new();

    ws.repl()
        .write_stdin("add Мария штурман\nlist\nremove Мария\nlist\nexit\n")
        .assert()
        .success()
        .stdout(concat!(
            "OK: добавлен \"Мария\" (штурман)\n",
            "1) Мария — штурман\n",
            "OK: удалён \"Мария\"\n",
            "нет записей\n",
        ));

    assert_eq!(ws.read_data().trim(), "[]");

    ws.repl()
        .write_stdin("list\nexit\n")
        .assert()
        .success()
        .stdout("нет записей\n");
}

#[test]
fn test_roster_survives_restart() {
    let ws = Workspace::new();

    ws.repl()
        .write_stdin("add Zoya штурман\nadd anna Водитель\nadd Boris грузчик\nexit\n")
        .assert()
        .success();

    ws.repl()
        .write_stdin("list\ncount\nlist --role водитель\nexit\n")
        .assert()
        .success()
        .stdout(concat!(
            "1) anna — водитель\n",
            "2) Boris — грузчик\n",
            "3) Zoya — штурман\n",
            "Всего участников: 3\n",
            "1) anna — водитель\n",
        ));
}

// ─────────────────────────────────────────────────────────────────
// Error Replies
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_usage_and_validation_errors_are_distinct() {
    let ws = Workspace::new();

    ws.repl()
        .write_stdin("add Ann\nadd Ann BadRole\nadd A штурман\nfly\nexit\n")
        .assert()
        .success()
        .stdout(concat!(
            "ERR: используйте: add <Имя> <Роль>\n",
            "ERR: роль должна быть одной из: штурман, водитель, грузчик, механик\n",
            "ERR: имя должно быть 2–40 символов (буквы, пробел, дефис)\n",
            "ERR: unknown command\n",
        ));
}

#[test]
fn test_duplicate_name_ignores_case() {
    let ws = Workspace::new();

    ws.repl()
        .write_stdin("add Ann штурман\nadd ann штурман\ncount\nexit\n")
        .assert()
        .success()
        .stdout(concat!(
            "OK: добавлен \"Ann\" (штурман)\n",
            "ERR: такое имя уже существует\n",
            "Всего участников: 1\n",
        ));
}

#[test]
fn test_remove_missing_member() {
    let ws = Workspace::new();

    ws.repl()
        .write_stdin("remove Nobody\nremove\nexit\n")
        .assert()
        .success()
        .stdout(concat!(
            "ERR: запись с именем \"Nobody\" не найдена\n",
            "ERR: используйте: remove <Имя>\n",
        ));
}

// ─────────────────────────────────────────────────────────────────
// Startup and Termination
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_corrupt_data_file_starts_empty() {
    let ws = Workspace::new();
    ws.write("members.json", "{\"oops\": true}");

    ws.repl()
        .write_stdin("count\nexit\n")
        .assert()
        .success()
        .stdout("ERR: ошибка чтения файла данных\nВсего участников: 0\n");
}

#[test]
fn test_end_of_input_exits_cleanly() {
    let ws = Workspace::new();

    ws.repl()
        .write_stdin("count")
        .assert()
        .success()
        .stdout("Всего участников: 0\n\n");
}

#[test]
fn test_banner_and_prompt() {
    let ws = Workspace::new();

    ws.cmd()
        .write_stdin("exit\n")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Учёт экспедиции (CLI)."))
        .stdout(predicate::str::ends_with("> "));
}

#[test]
fn test_help_lists_commands_and_roles() {
    let ws = Workspace::new();

    ws.repl()
        .write_stdin("help\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("add <Имя> <Роль>"))
        .stdout(predicate::str::contains("list --role <Роль>"))
        .stdout(predicate::str::contains("Роли: штурман, водитель, грузчик, механик"));
}

// ─────────────────────────────────────────────────────────────────
// Data File Selection
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_file_flag() {
    let ws = Workspace::new();
    let crew = ws.path().join("crew").join("crew.json");

    ws.repl()
        .arg("--file")
        .arg(&crew)
        .write_stdin("add Ivan механик\nexit\n")
        .assert()
        .success();

    assert!(crew.exists());
    assert!(!ws.data_file().exists());
}

#[test]
fn test_data_file_env() {
    let ws = Workspace::new();

    ws.repl()
        .env("ROSTER_DATA_FILE", "team.json")
        .write_stdin("add Ivan механик\nexit\n")
        .assert()
        .success();

    assert!(ws.path().join("team.json").exists());
}

#[test]
fn test_custom_roles_from_config() {
    let ws = Workspace::new();
    let config = ws.write(
        "roster.toml",
        "[roster]\nroles = [\"Cook\", \"Medic\"]\n",
    );

    ws.repl()
        .arg("--config")
        .arg(&config)
        .write_stdin("add Ivan штурман\nadd Ivan COOK\nexit\n")
        .assert()
        .success()
        .stdout(concat!(
            "ERR: роль должна быть одной из: cook, medic\n",
            "OK: добавлен \"Ivan\" (cook)\n",
        ));

    assert!(ws.read_data().contains("\"role\": \"cook\""));
}
