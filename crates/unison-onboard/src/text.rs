//! Static onboarding copy printed between the interactive steps.

pub const BANNER: &str = r#"
🚀 Welcome to Unison!
🌟 The Future of Human-Computer Interaction

Where technology adapts to you, not the other way around.
"#;

pub const INSTALL_GUIDANCE: &str = r#"
📦 Installing prerequisites...
Please install the following tools:

1. Docker Desktop:
   - Mac: https://docs.docker.com/docker-for-mac/install/
   - Windows: https://docs.docker.com/docker-for-windows/install/
   - Linux: https://docs.docker.com/engine/install/

2. Git:
   - Mac: brew install git
   - Windows: https://git-scm.com/download/win
   - Linux: sudo apt-get install git

"#;

pub const FIRST_STEPS: &str = r#"
🎯 Your First Steps with Unison:

1. 💬 Try the Chat Interface:
   - Type: "Hello Unison, what can you do?"
   - Try: "Help me plan my day"
   - Ask: "What's my current context?"

2. 🔧 Explore Settings:
   - Click the gear icon ⚙️
   - Set your name and preferences
   - Configure notification settings

3. 🌟 Try Scenarios:
   - Click "Scenarios" in the interface
   - Try "Morning Assistant" or "Focus Mode"
   - Experience context-aware interactions

4. 📚 Learn More:
   - Read the documentation: https://docs.unisonos.org
   - Join the community: https://discord.gg/unison
   - Watch tutorials: https://youtube.com/c/unisonplatform

🎉 Welcome to the future of adaptive technology!
"#;

pub const TROUBLESHOOTING: &str = r#"
🔧 Troubleshooting Tips:

If something doesn't work:

1. Check Service Health:
   cd unison && make health

2. View Logs:
   cd unison && make logs

3. Restart Services:
   cd unison && make down && make up

4. Get Help:
   - Discord: https://discord.gg/unison
   - GitHub Issues: https://github.com/unison-platform/unison/issues
   - Email: support@unisonos.org

Common Issues:
- Port 3000 in use: Kill process with `lsof -ti:3000 | xargs kill -9`
- Docker issues: Restart Docker Desktop
- Memory issues: Increase Docker memory to 8GB+
"#;

pub const COMPLETION: &str = r#"
🎉 Setup Complete!

You now have Unison running locally. The platform includes:
- 15+ microservices working together
- Real-time context understanding
- Natural language processing
- Dynamic experience generation

Next: Open your browser to http://localhost:3000 and start exploring!

🌟 Welcome to the Unison community!
"#;
