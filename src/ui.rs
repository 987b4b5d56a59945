use crate::pipeline::Snapshot;

const DEFAULT_THEME_COLOR: &str = "#2f4858";

pub fn render_index(snapshot: &Snapshot, install_visible: bool) -> String {
    let stats = &snapshot.stats;
    let calendar: String = snapshot
        .calendar
        .iter()
        .map(|cell| {
            let class = if cell.completed { "day completed" } else { "day" };
            format!(r#"<div class="{class}" data-day="{day}">{day}</div>"#, day = cell.day)
        })
        .collect();

    let (theme_style, theme_value) = match &snapshot.theme {
        Some(theme) => (
            format!(
                "<style>:root {{ --primary: {}; --accent: {}; }}</style>",
                theme.primary, theme.accent
            ),
            theme.primary.as_str(),
        ),
        None => (String::new(), DEFAULT_THEME_COLOR),
    };

    let reminder_time = snapshot.reminder.time.as_deref().map(escape_attr).unwrap_or_default();

    INDEX_HTML
        .replace("{{THEME_STYLE}}", &theme_style)
        .replace("{{THEME_VALUE}}", theme_value)
        .replace("{{DAYS_COMPLETED}}", &stats.days_completed.to_string())
        .replace("{{TOTAL_SAVED}}", &stats.total_saved.to_string())
        .replace("{{EXPECTED_SAVED}}", &stats.expected_saved.to_string())
        .replace("{{PERFORMANCE_MESSAGE}}", stats.performance_message)
        .replace("{{PERFORMANCE_COLOR}}", stats.performance_color)
        .replace("{{PROGRESS}}", &format!("{:.2}", stats.progress_percent))
        .replace("{{CALENDAR}}", &calendar)
        .replace("{{REMINDER_CHECKED}}", if snapshot.reminder.enabled { "checked" } else { "" })
        .replace("{{REMINDER_TIME}}", &reminder_time)
        .replace("{{INSTALL_DISPLAY}}", if install_visible { "block" } else { "none" })
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

pub const MANIFEST_JSON: &str = r##"{
  "name": "The Billionaires Empire: 365-Day Savings Challenge",
  "short_name": "Savings 365",
  "start_url": "/",
  "display": "standalone",
  "background_color": "#10151c",
  "theme_color": "#2f4858",
  "icons": []
}
"##;

pub const SERVICE_WORKER_JS: &str = r#"self.addEventListener('install', () => self.skipWaiting());
self.addEventListener('activate', (event) => event.waitUntil(self.clients.claim()));
self.addEventListener('fetch', () => {});
"#;

const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>The Billionaires Empire - 365 Day Savings</title>
  <link rel="manifest" href="/manifest.webmanifest" />
  <style>
    :root {
      --primary: #2f4858;
      --accent: rgb(67, 92, 108);
      --bg: #10151c;
      --ink: #f3efe6;
      --card: rgba(255, 255, 255, 0.06);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: linear-gradient(160deg, var(--bg), #1b2430 70%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(960px, 100%);
      display: grid;
      gap: 24px;
    }

    h1 {
      margin: 0;
      font-size: clamp(1.8rem, 4vw, 2.6rem);
      color: var(--accent);
    }

    .card {
      background: var(--card);
      border-radius: 20px;
      padding: 20px;
      display: grid;
      gap: 14px;
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(160px, 1fr));
      gap: 12px;
    }

    .stat .label {
      display: block;
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      opacity: 0.7;
    }

    .stat .value {
      font-size: 1.6rem;
      font-weight: 600;
    }

    .progress {
      height: 14px;
      border-radius: 999px;
      background: rgba(255, 255, 255, 0.1);
      overflow: hidden;
    }

    #progressFill {
      height: 100%;
      background: linear-gradient(90deg, var(--primary), var(--accent));
      transition: width 300ms ease;
    }

    .row {
      display: flex;
      flex-wrap: wrap;
      gap: 12px;
      align-items: center;
    }

    input[type="number"], input[type="time"] {
      padding: 10px 12px;
      border-radius: 12px;
      border: 1px solid rgba(255, 255, 255, 0.2);
      background: transparent;
      color: var(--ink);
      font-size: 1rem;
    }

    button {
      border: none;
      border-radius: 999px;
      padding: 12px 20px;
      font-size: 1rem;
      font-weight: 600;
      cursor: pointer;
      background: var(--primary);
      color: white;
    }

    button:active {
      transform: scale(0.98);
    }

    #calendar {
      display: grid;
      grid-template-columns: repeat(auto-fill, minmax(42px, 1fr));
      gap: 6px;
    }

    .day {
      text-align: center;
      padding: 8px 0;
      border-radius: 10px;
      background: rgba(255, 255, 255, 0.05);
      font-size: 0.85rem;
    }

    .day.completed {
      background: var(--accent);
      color: #10151c;
      font-weight: 600;
    }

    #installBtn {
      display: {{INSTALL_DISPLAY}};
    }
  </style>
  {{THEME_STYLE}}
</head>
<body>
  <main class="app">
    <header class="row">
      <h1>365-Day Savings Challenge</h1>
      <button id="installBtn" type="button">Install app</button>
    </header>

    <section class="card">
      <div class="panel">
        <div class="stat"><span class="label">Days completed</span><span id="daysCompleted" class="value">{{DAYS_COMPLETED}}</span></div>
        <div class="stat"><span class="label">Total saved</span><span id="totalSaved" class="value">{{TOTAL_SAVED}}</span></div>
        <div class="stat"><span class="label">Expected</span><span id="expectedSaved" class="value">{{EXPECTED_SAVED}}</span></div>
      </div>
      <div id="performanceStatus" style="color: {{PERFORMANCE_COLOR}}">{{PERFORMANCE_MESSAGE}}</div>
      <div class="progress"><div id="progressFill" style="width: {{PROGRESS}}%"></div></div>
    </section>

    <section class="card">
      <form id="depositForm" class="row" method="post" action="/deposit">
        <input id="amount" name="day" type="number" min="1" max="365" placeholder="Day (1-365)" required />
        <button id="depositBtn" type="submit">Deposit</button>
      </form>
    </section>

    <section class="card">
      <div class="row">
        <label>Theme <input id="themeColor" type="color" value="{{THEME_VALUE}}" /></label>
        <label><input id="enableReminder" type="checkbox" {{REMINDER_CHECKED}} /> Daily reminder</label>
        <input id="reminderTime" type="time" value="{{REMINDER_TIME}}" />
      </div>
    </section>

    <section id="calendar" class="card">{{CALENDAR}}</section>
  </main>

  <script>
    const calendarEl = document.getElementById('calendar');
    const depositForm = document.getElementById('depositForm');
    const amountInput = document.getElementById('amount');
    const themeInput = document.getElementById('themeColor');
    const enableReminder = document.getElementById('enableReminder');
    const reminderTimeInput = document.getElementById('reminderTime');
    const installBtn = document.getElementById('installBtn');
    let deferredPrompt = null;

    const postJson = async (url, body) => {
      const res = await fetch(url, {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify(body || {})
      });
      if (!res.ok) {
        throw new Error((await res.text()) || 'Request failed');
      }
      return res.json();
    };

    const notificationSupport = () => ({
      available: 'Notification' in window,
      permission: 'Notification' in window ? Notification.permission : 'default'
    });

    const applyTheme = (theme) => {
      if (!theme) {
        return;
      }
      document.documentElement.style.setProperty('--primary', theme.primary);
      document.documentElement.style.setProperty('--accent', theme.accent);
    };

    const renderSnapshot = (snapshot) => {
      const stats = snapshot.stats;
      document.getElementById('daysCompleted').textContent = stats.days_completed;
      document.getElementById('totalSaved').textContent = stats.total_saved;
      document.getElementById('expectedSaved').textContent = stats.expected_saved;
      const status = document.getElementById('performanceStatus');
      status.textContent = stats.performance_message;
      status.style.color = stats.performance_color;
      document.getElementById('progressFill').style.width = stats.progress_percent + '%';

      calendarEl.replaceChildren(...snapshot.calendar.map((cell) => {
        const box = document.createElement('div');
        box.className = cell.completed ? 'day completed' : 'day';
        box.dataset.day = cell.day;
        box.textContent = cell.day;
        return box;
      }));
      applyTheme(snapshot.theme);
    };

    const handleNotifier = async (result) => {
      if (result.request_permission && 'Notification' in window) {
        await Notification.requestPermission();
      }
      result.notifications.forEach((n) => new Notification(n.title, { body: n.body }));
    };

    depositForm.addEventListener('submit', (event) => {
      event.preventDefault();
      postJson('/api/deposit', { day: Number(amountInput.value) })
        .then((snapshot) => {
          amountInput.value = '';
          renderSnapshot(snapshot);
        })
        .catch((err) => alert(err.message));
    });

    themeInput.addEventListener('input', (event) => {
      postJson('/api/theme', { color: event.target.value })
        .then(applyTheme)
        .catch((err) => alert(err.message));
    });

    enableReminder.addEventListener('change', () => {
      postJson('/api/reminder', { enabled: enableReminder.checked, notifications: notificationSupport() })
        .then(handleNotifier)
        .catch((err) => alert(err.message));
    });

    reminderTimeInput.addEventListener('change', () => {
      postJson('/api/reminder', { time: reminderTimeInput.value, notifications: notificationSupport() })
        .then(handleNotifier)
        .catch((err) => alert(err.message));
    });

    window.addEventListener('beforeinstallprompt', (event) => {
      event.preventDefault();
      deferredPrompt = event;
      postJson('/api/install/available')
        .then((status) => {
          installBtn.style.display = status.trigger_visible ? 'block' : 'none';
        })
        .catch(() => {});
    });

    installBtn.addEventListener('click', async () => {
      installBtn.style.display = 'none';
      const result = await postJson('/api/install/trigger');
      if (result.status === 'prompt' && !deferredPrompt) {
        await postJson('/api/install/choice', { outcome: 'dismissed' });
      }
      if (result.status !== 'prompt' || !deferredPrompt) {
        alert(result.message || 'Install prompt not available right now. Try again later!');
        return;
      }
      deferredPrompt.prompt();
      const choice = await deferredPrompt.userChoice;
      deferredPrompt = null;
      await postJson('/api/install/choice', { outcome: choice.outcome === 'accepted' ? 'accepted' : 'dismissed' });
    });

    if ('serviceWorker' in navigator) {
      navigator.serviceWorker.register('/sw.js').catch(() => {});
    }

    postJson('/api/install/display-mode', {
      standalone: window.matchMedia('(display-mode: standalone)').matches
    })
      .then((status) => {
        installBtn.style.display = status.trigger_visible ? 'block' : 'none';
      })
      .catch(() => {});

    postJson('/api/reminder/check', { notifications: notificationSupport() })
      .then(handleNotifier)
      .catch(() => {});
  </script>
</body>
</html>
"##;
