//! Interactive CLI loop.

use hiroba_server::domain::{ChatMessage, DisplayName, RoomId};
use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::sync::{mpsc, watch};

use crate::{
    config::ClientConfig,
    connection::Connection,
    error::{ClientError, ConnectionError},
    session::{ClientSession, SessionView},
};

/// Ask for missing identity fields, join the room and chat until EOF.
pub async fn run_client(config: ClientConfig) -> Result<(), ClientError> {
    let name = match config.name {
        Some(name) => name,
        None => prompt("Name...: ")?,
    };
    let room = match config.room {
        Some(room) => room,
        None => prompt("Room...: ")?,
    };

    let me = DisplayName::new(name);
    let session = ClientSession::join(&config.url, me.clone(), RoomId::new(room.clone())).await?;
    println!("Welcome, {} to Chatroom: {}", me, room);

    let render = tokio::spawn(render_log(session.subscribe(), me));

    // rustyline blocks, so input is read on its own thread
    let (line_tx, line_rx) = mpsc::unbounded_channel::<String>();
    std::thread::spawn(move || read_lines(line_tx));

    chat_loop(&session, line_rx).await;

    render.abort();
    session.disconnect();
    Ok(())
}

/// Send each input line until input ends or the server closes the connection.
async fn chat_loop<C: Connection>(
    session: &ClientSession<C>,
    mut lines: mpsc::UnboundedReceiver<String>,
) {
    let mut updates = session.subscribe();
    loop {
        let line = tokio::select! {
            line = lines.recv() => match line {
                Some(line) => line,
                None => break,
            },
            _ = updates.wait_for(|view| view.closed) => {
                println!("Connection closed by server");
                break;
            }
        };
        if line.is_empty() {
            continue;
        }
        match session.send(line) {
            Ok(()) => {}
            Err(ClientError::Connection(ConnectionError::Closed)) => {
                tracing::warn!("Connection closed by server");
                break;
            }
            Err(e) => tracing::warn!("Failed to send message: {}", e),
        }
    }
}

fn prompt(label: &str) -> Result<String, ClientError> {
    let mut editor = DefaultEditor::new()?;
    Ok(editor.readline(label)?)
}

fn read_lines(lines: mpsc::UnboundedSender<String>) {
    let mut editor = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(e) => {
            tracing::error!("Failed to open terminal: {}", e);
            return;
        }
    };
    loop {
        match editor.readline("") {
            Ok(line) => {
                let _ = editor.add_history_entry(line.as_str());
                if lines.send(line).is_err() {
                    break;
                }
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => {
                tracing::error!("Failed to read input: {}", e);
                break;
            }
        }
    }
}

async fn render_log(mut updates: watch::Receiver<SessionView>, me: DisplayName) {
    let mut printed = 0;
    loop {
        {
            let view = updates.borrow_and_update();
            for message in view.log.since(printed) {
                println!("{}", format_line(message, &me));
            }
            printed = view.log.len();
        }
        if updates.changed().await.is_err() {
            break;
        }
    }
}

/// Render one log entry, marking the user's own messages
fn format_line(message: &ChatMessage, me: &DisplayName) -> String {
    let marker = if &message.author == me { "You" } else { "Other" };
    format!("[{}] {}: {}", marker, message.author, message.body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{connection::MockConnection, session::ClientIdentity};
    use hiroba_server::domain::MessageBody;
    use std::time::Duration;

    fn entered_session(connection: MockConnection) -> ClientSession<MockConnection> {
        let mut session = ClientSession::new();
        session
            .enter(
                ClientIdentity::new(DisplayName::new("Alice")),
                RoomId::new("lobby"),
                connection,
            )
            .unwrap();
        session
    }

    #[test]
    fn test_format_line_marks_own_messages() {
        // テスト項目: 自分の表示名と同じ author のメッセージは You として表示される
        // given (前提条件):
        let me = DisplayName::new("Alice");
        let mine = ChatMessage::new(DisplayName::new("Alice"), MessageBody::new("hi"));
        let theirs = ChatMessage::new(DisplayName::new("Bob"), MessageBody::new("hey"));

        // then (期待する結果):
        assert_eq!(format_line(&mine, &me), "[You] Alice: hi");
        assert_eq!(format_line(&theirs, &me), "[Other] Bob: hey");
    }

    #[tokio::test]
    async fn test_chat_loop_sends_lines_until_input_ends() {
        // テスト項目: 入力行は空行を除いて送信され、入力が終わるとループを抜ける
        // given (前提条件):
        let mut connection = MockConnection::new();
        connection.expect_emit().times(3).returning(|_| Ok(()));
        let session = entered_session(connection);
        let (tx, rx) = mpsc::unbounded_channel();
        for line in ["one", "", "two"] {
            tx.send(line.to_string()).unwrap();
        }
        drop(tx);

        // when (操作):
        let result = tokio::time::timeout(Duration::from_secs(1), chat_loop(&session, rx)).await;

        // then (期待する結果):
        // join_room + 2 行
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_chat_loop_exits_when_server_closes() {
        // テスト項目: 入力が続いていてもサーバーが接続を閉じればループを抜ける
        // given (前提条件):
        let mut connection = MockConnection::new();
        connection.expect_emit().returning(|_| Ok(()));
        let session = entered_session(connection);
        let (_tx, rx) = mpsc::unbounded_channel();

        // when (操作):
        session.sink().mark_closed();
        let result = tokio::time::timeout(Duration::from_secs(1), chat_loop(&session, rx)).await;

        // then (期待する結果):
        assert!(result.is_ok());
    }
}
