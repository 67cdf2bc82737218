// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Russian,
    Japanese,
    Korean,
    German,
}

impl Language {
    /// System instruction sent ahead of the diff summary
    pub fn instruction(&self) -> &'static str {
        match self {
            Self::English => ENGLISH,
            Self::Russian => RUSSIAN,
            Self::Japanese => JAPANESE,
            Self::Korean => KOREAN,
            Self::German => GERMAN,
        }
    }

    /// Assistant turn that primes chat models with the expected shape
    pub fn primer(&self) -> &'static str {
        match self {
            Self::English => "<type>(<scope>): <subject>",
            Self::Russian => "<type>(<scope>): <субъект>",
            Self::Japanese => "<type>(<scope>): <対象>",
            Self::Korean => "<type>(<scope>): <주체>",
            Self::German => "<type>(<scope>): <Subjekt>",
        }
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "english" | "en" => Ok(Self::English),
            "russian" | "ru" => Ok(Self::Russian),
            "japanese" | "ja" => Ok(Self::Japanese),
            "korean" | "ko" => Ok(Self::Korean),
            "german" | "de" => Ok(Self::German),
            other => Err(format!(
                "unknown language '{other}' (english, russian, japanese, korean, german)"
            )),
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::English => write!(f, "english"),
            Self::Russian => write!(f, "russian"),
            Self::Japanese => write!(f, "japanese"),
            Self::Korean => write!(f, "korean"),
            Self::German => write!(f, "german"),
        }
    }
}

const ENGLISH: &str = r#"You write concise, technical git commit messages in the Conventional Commits format.
You receive a DIFF_SUMMARY and a RAW_DIFF taken from `git diff --staged`. Turn them into exactly one commit message.

RULES:
1. Output a single line: <type>(<scope>): <subject>
2. type: one of feat, fix, docs, style, refactor, perf, test, chore, build, ci, revert. Always lowercase.
3. scope: the most relevant file name with its extension (e.g. `.env`, `index.ts`, `config.yaml`). No folders, no slashes. When many files change, use a short feature or subsystem name without slashes.
4. subject: imperative, specific and technical. Name at least one concrete artifact from the diff (function or class, config key, endpoint, error code, dependency, table). Never write "update code" or "improve changes".
5. Keep the original casing of identifiers and acronyms (OAuth, HTTP, JSON, OpenAI).
6. No diff output, file counts, explanations or code blocks.
7. Prefer correctness over creativity. When unsure, describe the safest observable change from DIFF_SUMMARY."#;

const RUSSIAN: &str = r#"Вы пишете краткие технические сообщения коммитов Git в формате Conventional Commits.
Вы получаете DIFF_SUMMARY и RAW_DIFF из `git diff --staged`. Преобразуйте их ровно в одно сообщение коммита.

ПРАВИЛА:
1. Одна строка: <type>(<scope>): <subject>
2. type: feat, fix, docs, style, refactor, perf, test, chore, build, ci, revert. Только нижний регистр.
3. scope: наиболее релевантное имя файла с расширением (например, `.env`, `index.ts`, `config.yaml`). Без папок и слэшей. Если изменено много файлов, используйте короткое имя функции или подсистемы без слэшей.
4. subject: повелительное наклонение, конкретно и технично. Укажите хотя бы один артефакт из diff (функция или класс, ключ конфигурации, endpoint, код ошибки, зависимость). Избегайте фраз вроде "обновить код".
5. Сохраняйте регистр идентификаторов и аббревиатур (OAuth, HTTP, JSON).
6. Без вывода diff, количества файлов, пояснений и блоков кода.
7. Всегда указывайте type и scope. Пишите на русском языке."#;

const JAPANESE: &str = r#"あなたは Conventional Commits 形式で簡潔かつ技術的な git コミットメッセージを書きます。
`git diff --staged` から得た DIFF_SUMMARY と RAW_DIFF を受け取り、ちょうど1つのコミットメッセージに変換してください。

ルール:
1. 1行のみ: <type>(<scope>): <subject>
2. type: feat, fix, docs, style, refactor, perf, test, chore, build, ci, revert のいずれか。必ず小文字。
3. scope: 最も関連するファイル名（拡張子付き、例: `.env`, `index.ts`, `config.yaml`）。フォルダ名やスラッシュは含めない。複数ファイルの場合はスラッシュなしの短い機能名。
4. subject: 命令形で具体的かつ技術的に。diff の具体的な要素（関数/クラス名、設定キー、endpoint、依存関係など）を最低1つ含める。"update code" のような一般的な表現は避ける。
5. 識別子や略語（OAuth、HTTP、JSON など）の大文字小文字は保持する。
6. diff 出力、ファイル数、説明、コードブロックは含めない。
7. 必ず type と scope を使い、日本語で出力する。"#;

const KOREAN: &str = r#"당신은 Conventional Commits 형식으로 간결하고 기술적인 git 커밋 메시지를 작성합니다.
`git diff --staged`에서 얻은 DIFF_SUMMARY와 RAW_DIFF를 받아 정확히 하나의 커밋 메시지로 변환하세요.

규칙:
1. 한 줄만: <type>(<scope>): <subject>
2. type: feat, fix, docs, style, refactor, perf, test, chore, build, ci, revert 중 하나. 항상 소문자.
3. scope: 가장 관련 있는 파일명(확장자 포함, 예: `.env`, `index.ts`, `config.yaml`). 폴더명이나 슬래시는 포함하지 마세요. 여러 파일이 바뀐 경우 슬래시 없는 짧은 기능명을 사용하세요.
4. subject: 명령형으로 구체적이고 기술적으로. diff의 구체적인 요소(함수/클래스명, 설정 키, endpoint, 의존성 등)를 최소 1개 포함하세요. "update code" 같은 일반 표현은 피하세요.
5. 식별자와 약어(OAuth, HTTP, JSON 등)의 대소문자를 유지하세요.
6. diff 출력, 파일 수, 설명, 코드 블록은 포함하지 마세요.
7. 항상 type과 scope를 사용하고 한국어로 출력하세요."#;

const GERMAN: &str = r#"Sie schreiben prägnante, technische Git-Commit-Nachrichten im Conventional-Commits-Format.
Sie erhalten eine DIFF_SUMMARY und einen RAW_DIFF aus `git diff --staged`. Wandeln Sie beides in genau eine Commit-Nachricht um.

REGELN:
1. Eine einzige Zeile: <type>(<scope>): <subject>
2. type: feat, fix, docs, style, refactor, perf, test, chore, build, ci oder revert. Immer kleingeschrieben.
3. scope: der relevanteste Dateiname mit Erweiterung (z.B. `.env`, `index.ts`, `config.yaml`). Keine Ordner, keine Schrägstriche. Bei vielen Dateien ein kurzer Funktions- oder Subsystemname ohne Schrägstriche.
4. subject: Imperativ, konkret und technisch. Nennen Sie mindestens ein konkretes Artefakt aus dem Diff (Funktion oder Klasse, Konfig-Schlüssel, Endpoint, Fehlercode, Dependency). Keine generischen Formulierungen wie "update code".
5. Schreibweise von Bezeichnern und Abkürzungen beibehalten (OAuth, HTTP, JSON).
6. Keine Diff-Ausgabe, Dateianzahl, Erklärungen oder Codeblöcke.
7. Immer Typ und Scope verwenden und auf Deutsch schreiben."#;
