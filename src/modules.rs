//! Themed learning modules (static catalog) and their lesson content.
//!
//! Lesson text is American English with Brazilian Portuguese translations.
//! Pronunciations use dictionary respelling.

use serde::Serialize;

use crate::domain::CefrLevel;

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ModuleCategory {
  Basic,
  Daily,
  Social,
  Practical,
  Professional,
  Special,
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct VocabularyItem {
  pub word: &'static str,
  pub translation: &'static str,
  pub pronunciation: &'static str,
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct Phrase {
  pub english: &'static str,
  pub portuguese: &'static str,
  pub pronunciation: &'static str,
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct DialogueLine {
  pub speaker: &'static str,
  pub text: &'static str,
  pub translation: &'static str,
}

/// Multiple-choice drill; `correct` indexes into `options`.
#[derive(Clone, Debug, Serialize)]
pub struct Exercise {
  pub question: &'static str,
  pub options: Vec<&'static str>,
  pub correct: usize,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
  /// 1-based position inside the module.
  pub number: u32,
  pub title: &'static str,
  pub description: &'static str,
  pub cefr_level: CefrLevel,
  pub vocabulary: Vec<VocabularyItem>,
  pub phrases: Vec<Phrase>,
  pub dialogues: Vec<DialogueLine>,
  pub exercises: Vec<Exercise>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningModule {
  pub id: u32,
  pub title: &'static str,
  pub emoji: &'static str,
  pub description: &'static str,
  pub cefr_level: CefrLevel,
  pub category: ModuleCategory,
  pub color: &'static str,
  pub lessons: Vec<Lesson>,
}

impl LearningModule {
  pub fn total_lessons(&self) -> u32 {
    self.lessons.len() as u32
  }

  pub fn lesson(&self, number: u32) -> Option<&Lesson> {
    self.lessons.iter().find(|l| l.number == number)
  }
}

#[derive(Clone, Debug)]
pub struct ModuleCatalog {
  modules: Vec<LearningModule>,
}

impl ModuleCatalog {
  pub fn builtin() -> Self {
    Self { modules: builtin_modules() }
  }

  pub fn all(&self) -> &[LearningModule] {
    &self.modules
  }

  pub fn by_level(&self, level: CefrLevel) -> Vec<LearningModule> {
    self.modules.iter().filter(|m| m.cefr_level == level).cloned().collect()
  }

  pub fn get(&self, id: u32) -> Option<&LearningModule> {
    self.modules.iter().find(|m| m.id == id)
  }
}

type Vocab = (&'static str, &'static str, &'static str);
type Line = (&'static str, &'static str, &'static str);
type Drill = (&'static str, &'static [&'static str], usize);

struct LessonSpec {
  title: &'static str,
  description: &'static str,
  vocabulary: &'static [Vocab],
  phrases: &'static [Line],
  dialogues: &'static [Line],
  exercises: &'static [Drill],
}

fn module(
  id: u32,
  title: &'static str,
  emoji: &'static str,
  description: &'static str,
  cefr_level: CefrLevel,
  category: ModuleCategory,
  color: &'static str,
  lessons: &[LessonSpec],
) -> LearningModule {
  let lessons = lessons
    .iter()
    .enumerate()
    .map(|(i, l)| Lesson {
      number: i as u32 + 1,
      title: l.title,
      description: l.description,
      cefr_level,
      vocabulary: l
        .vocabulary
        .iter()
        .map(|&(word, translation, pronunciation)| VocabularyItem { word, translation, pronunciation })
        .collect(),
      phrases: l
        .phrases
        .iter()
        .map(|&(english, portuguese, pronunciation)| Phrase { english, portuguese, pronunciation })
        .collect(),
      dialogues: l
        .dialogues
        .iter()
        .map(|&(speaker, text, translation)| DialogueLine { speaker, text, translation })
        .collect(),
      exercises: l
        .exercises
        .iter()
        .map(|&(question, options, correct)| Exercise { question, options: options.to_vec(), correct })
        .collect(),
    })
    .collect();
  LearningModule { id, title, emoji, description, cefr_level, category, color, lessons }
}

fn builtin_modules() -> Vec<LearningModule> {
  use CefrLevel::*;
  use ModuleCategory::*;

  vec![
    module(1, "Greetings & Introductions", "👋", "Aprenda a saudar e se apresentar em inglês americano", A1, Basic,
      "from-blue-400 to-blue-600", &[LessonSpec {
        title: "Basic Greetings",
        description: "Saudações básicas e respostas",
        vocabulary: &[
          ("Hello", "Olá", "hə-ˈlō"),
          ("Hi", "Oi", "hī"),
          ("Good morning", "Bom dia", "ˈɡo͝od ˈmȯr-niŋ"),
          ("Good afternoon", "Boa tarde", "ˈɡo͝od ˌaf-tər-ˈno͞on"),
          ("Good evening", "Boa noite", "ˈɡo͝od ˈē-vniŋ"),
          ("Goodbye", "Adeus", "ˌɡo͝od-ˈbī"),
        ],
        phrases: &[
          ("How are you?", "Como você está?", "ˌhau̇ ˈär ˈyo͞o"),
          ("I'm fine, thank you", "Estou bem, obrigado", "ˈīm ˈfīn ˈθaŋk ˈyo͞o"),
          ("Nice to meet you", "Prazer em conhecê-lo", "ˈnīs tə ˈmēt ˈyo͞o"),
          ("What's your name?", "Qual é seu nome?", "ˈwəts ˈyȯr ˈnām"),
          ("My name is...", "Meu nome é...", "ˈmī ˈnām ˈiz"),
        ],
        dialogues: &[
          ("Teacher", "Hello! How are you today?", "Olá! Como você está hoje?"),
          ("Student", "Hi! I'm doing great, thank you!", "Oi! Estou indo ótimo, obrigado!"),
          ("Teacher", "That's wonderful! What's your name?", "Que maravilhoso! Qual é seu nome?"),
          ("Student", "My name is José. Nice to meet you!", "Meu nome é José. Prazer em conhecê-lo!"),
        ],
        exercises: &[
          ("Como você diz 'Olá' em inglês?", &["Goodbye", "Hello", "Thank you", "Please"], 1),
          ("Qual é a resposta correta para 'How are you?'",
            &["I'm fine, thank you", "Goodbye", "Nice to meet you", "What's your name?"], 0),
        ],
      }]),
    module(2, "Daily Routines", "🌅", "Descreva suas atividades diárias em inglês", A1, Daily,
      "from-orange-400 to-orange-600", &[LessonSpec {
        title: "Morning Routine",
        description: "Atividades matinais",
        vocabulary: &[
          ("Wake up", "Acordar", "ˈwāk ˈəp"),
          ("Shower", "Tomar banho", "ˈshau̇(-ə)r"),
          ("Breakfast", "Café da manhã", "ˈbrek-fəst"),
          ("Get dressed", "Se vestir", "ˈɡet ˈdrest"),
          ("Go to work", "Ir para o trabalho", "ˈɡō tə ˈwərk"),
        ],
        phrases: &[
          ("I wake up at 7 AM", "Acordo às 7 da manhã", "ˈī ˈwāk ˈəp ət ˈsev-ən"),
          ("I take a shower", "Tomo um banho", "ˈī ˈtāk ə ˈshau̇(-ə)r"),
          ("I eat breakfast", "Como café da manhã", "ˈī ˈēt ˈbrek-fəst"),
          ("I get ready for work", "Me preparo para o trabalho", "ˈī ˈɡet ˈre-dē ˈfȯr ˈwərk"),
        ],
        dialogues: &[
          ("Teacher", "What time do you wake up?", "Que horas você acorda?"),
          ("Student", "I wake up at 7 AM every day.", "Acordo às 7 da manhã todos os dias."),
          ("Teacher", "What do you do after waking up?", "O que você faz depois de acordar?"),
          ("Student", "I take a shower and eat breakfast.", "Tomo um banho e como café da manhã."),
        ],
        exercises: &[("Como você diz 'Tomar banho' em inglês?", &["Sleep", "Shower", "Eat", "Work"], 1)],
      }]),
    module(3, "Small Talk & Social Skills", "💬", "Conversas informais e habilidades sociais", A2, Social,
      "from-pink-400 to-pink-600", &[LessonSpec {
        title: "Making Conversation",
        description: "Iniciar e manter conversas",
        vocabulary: &[
          ("Weather", "Clima", "ˈwe-t͟hər"),
          ("Nice", "Legal/Agradável", "ˈnīs"),
          ("Beautiful", "Bonito", "ˈbyo͞o-tə-fəl"),
          ("Interesting", "Interessante", "ˈin-tə-ˌre-stiŋ"),
        ],
        phrases: &[
          ("It's a beautiful day!", "É um dia lindo!", "ˈits ə ˈbyo͞o-tə-fəl ˈdā"),
          ("What do you think about...?", "O que você acha sobre...?", "ˈwət ˌdo͞o ˈyo͞o ˈθiŋk ə-ˈbau̇t"),
          ("I totally agree!", "Eu totalmente concordo!", "ˈī ˈtō-tə-lē ə-ˈɡrēd"),
          ("That's interesting!", "Isso é interessante!", "ˈðats ˈin-tə-ˌre-stiŋ"),
        ],
        dialogues: &[
          ("Teacher", "It's such a beautiful day today, isn't it?", "É um dia tão lindo hoje, não é?"),
          ("Student", "Yes, absolutely! The weather is perfect!", "Sim, absolutamente! O clima está perfeito!"),
          ("Teacher", "Do you like sunny days?", "Você gosta de dias ensolarados?"),
          ("Student", "I love them! They make me feel happy.", "Eu adoro! Eles me fazem sentir feliz."),
        ],
        exercises: &[("Como você responde 'It's a beautiful day'?",
          &["No, it's not", "Yes, absolutely!", "I don't know", "Goodbye"], 1)],
      }]),
    module(4, "Ordering Food & Drinks", "🍽️", "Pedir comida e bebidas em restaurantes", A2, Practical,
      "from-red-400 to-red-600", &[LessonSpec {
        title: "Restaurant Basics",
        description: "Vocabulário e frases para restaurantes",
        vocabulary: &[
          ("Menu", "Cardápio", "ˈme-ˌnü"),
          ("Water", "Água", "ˈwȯ-tər"),
          ("Coffee", "Café", "kə-ˈfē"),
          ("Food", "Comida", "ˈfo͞od"),
          ("Delicious", "Delicioso", "də-ˈli-shəs"),
        ],
        phrases: &[
          ("I'd like a table for two", "Gostaria de uma mesa para dois", "ˈīd ˈlīk ə ˈtā-bəl ˈfȯr ˈto͞o"),
          ("Can I have the menu?", "Posso ter o cardápio?", "ˈkan ˈī ˈhav t͟hə ˈme-ˌnü"),
          ("I'll have...", "Vou querer...", "ˈīl ˈhav"),
          ("The check, please", "A conta, por favor", "t͟hə ˈt͟sek pləˈzir"),
        ],
        dialogues: &[
          ("Waiter", "Good evening! Welcome to our restaurant.", "Boa noite! Bem-vindo ao nosso restaurante."),
          ("Student", "Thank you! I'd like a table for two, please.", "Obrigado! Gostaria de uma mesa para dois, por favor."),
          ("Waiter", "Of course! Here's the menu.", "Claro! Aqui está o cardápio."),
          ("Student", "I'll have the grilled chicken and a water, please.", "Vou querer frango grelhado e uma água, por favor."),
        ],
        exercises: &[("Como você pede a conta em inglês?",
          &["I want food", "The check, please", "More water", "Goodbye"], 1)],
      }]),
    module(5, "Shopping & Bargaining", "🛍️", "Compras e negociação de preços", A2, Practical,
      "from-purple-400 to-purple-600", &[LessonSpec {
        title: "Shopping Phrases",
        description: "Vocabulário de compras",
        vocabulary: &[
          ("Price", "Preço", "ˈprīs"),
          ("Discount", "Desconto", "ˈdis-ˌkau̇nt"),
          ("Size", "Tamanho", "ˈsīz"),
          ("Color", "Cor", "ˈkə-lər"),
        ],
        phrases: &[
          ("How much is this?", "Quanto custa isso?", "ˌhau̇ ˈməch ˈiz ˈt͟his"),
          ("Do you have a discount?", "Você tem desconto?", "ˌdo͞o ˈyo͞o ˈhav ə ˈdis-ˌkau̇nt"),
          ("What size do you have?", "Que tamanho você tem?", "ˈwət ˈsīz ˌdo͞o ˈyo͞o ˈhav"),
          ("I'll take it!", "Vou levar!", "ˈīl ˈtāk ˈit"),
        ],
        dialogues: &[
          ("Shopkeeper", "Can I help you?", "Posso ajudá-lo?"),
          ("Student", "Yes, how much is this shirt?", "Sim, quanto custa essa camisa?"),
          ("Shopkeeper", "It's $30. Do you like it?", "Custa $30. Você gosta?"),
          ("Student", "Yes, I'll take it!", "Sim, vou levar!"),
        ],
        exercises: &[("Como você pergunta o preço em inglês?",
          &["Where is it?", "How much is this?", "What time is it?", "Who are you?"], 1)],
      }]),
    module(6, "Travel & Directions", "✈️", "Viagens e pedindo direções", B1, Practical,
      "from-cyan-400 to-cyan-600", &[LessonSpec {
        title: "Getting Around",
        description: "Navegação e transporte",
        vocabulary: &[
          ("Airport", "Aeroporto", "ˈer-ˌpȯrt"),
          ("Hotel", "Hotel", "hō-ˈtel"),
          ("Taxi", "Táxi", "ˈtak-sē"),
          ("Street", "Rua", "ˈstrēt"),
        ],
        phrases: &[
          ("Where is the airport?", "Onde fica o aeroporto?", "ˌwer ˈiz t͟hē ˈer-ˌpȯrt"),
          ("How do I get to...?", "Como chego em...?", "ˌhau̇ ˌdo͞o ˈī ˈɡet ˈto͞o"),
          ("Turn left/right", "Vire à esquerda/direita", "ˈtərn ˈleft ˈrīt"),
          ("Go straight", "Vá em frente", "ˈɡō ˈstrāt"),
        ],
        dialogues: &[
          ("Tourist", "Excuse me, where is the hotel?", "Com licença, onde fica o hotel?"),
          ("Local", "Go straight ahead, then turn left.", "Vá em frente, depois vire à esquerda."),
          ("Tourist", "How far is it?", "Quão longe fica?"),
          ("Local", "About 5 minutes walk.", "Uns 5 minutos de caminhada."),
        ],
        exercises: &[("Como você pergunta 'Onde fica o aeroporto?'",
          &["What time is it?", "Where is the airport?", "How are you?", "Nice to meet you"], 1)],
      }]),
    module(7, "Work & Business English", "💼", "Inglês profissional e negócios", B1, Professional,
      "from-slate-400 to-slate-600", &[LessonSpec {
        title: "Office Communication",
        description: "Comunicação no ambiente corporativo",
        vocabulary: &[
          ("Meeting", "Reunião", "ˈmē-tiŋ"),
          ("Deadline", "Prazo", "ˈded-ˌlīn"),
          ("Project", "Projeto", "ˈprä-ˌjekt"),
          ("Report", "Relatório", "ri-ˈpȯrt"),
        ],
        phrases: &[
          ("Let's schedule a meeting", "Vamos agendar uma reunião", "ˈlets ˈske-jo͞ol ə ˈmē-tiŋ"),
          ("What's the deadline?", "Qual é o prazo?", "ˈwəts t͟hə ˈded-ˌlīn"),
          ("I'll send you the report", "Vou enviar o relatório", "ˈīl ˈsend ˈyo͞o t͟hə ri-ˈpȯrt"),
          ("Can we discuss this?", "Podemos discutir isso?", "ˈkan ˈwē dis-ˈkəsh ˈt͟his"),
        ],
        dialogues: &[
          ("Boss", "Good morning! Let's discuss the project.", "Bom dia! Vamos discutir o projeto."),
          ("Employee", "Sure! What's the deadline?", "Claro! Qual é o prazo?"),
          ("Boss", "Next Friday. Can you have the report ready?", "Próxima sexta. Você consegue ter o relatório pronto?"),
          ("Employee", "Yes, absolutely! I'll send it by Thursday.", "Sim, absolutamente! Vou enviar na quinta."),
        ],
        exercises: &[("Como você pergunta 'Qual é o prazo?'",
          &["What's the deadline?", "What time is it?", "How are you?", "Where is it?"], 0)],
      }]),
    module(8, "Hobbies & Interests", "🎮", "Hobbies, passatempos e interesses pessoais", B1, Social,
      "from-green-400 to-green-600", &[LessonSpec {
        title: "Talking About Hobbies",
        description: "Conversas sobre passatempos",
        vocabulary: &[
          ("Hobby", "Passatempo", "ˈhä-bē"),
          ("Sports", "Esportes", "ˈspȯrts"),
          ("Music", "Música", "ˈmyo͞o-zik"),
          ("Reading", "Leitura", "ˈrē-diŋ"),
        ],
        phrases: &[
          ("What are your hobbies?", "Quais são seus passatempos?", "ˈwət ˈär ˈyȯr ˈhä-bēz"),
          ("I love playing soccer", "Eu adoro jogar futebol", "ˈī ˈləv ˈplā-iŋ ˈsä-kər"),
          ("Do you like music?", "Você gosta de música?", "ˌdo͞o ˈyo͞o ˈlīk ˈmyo͞o-zik"),
          ("I enjoy reading books", "Eu gosto de ler livros", "ˈī en-ˈjȯi ˈrē-diŋ ˈbo͝oks"),
        ],
        dialogues: &[
          ("Friend", "What do you like to do in your free time?", "O que você gosta de fazer no seu tempo livre?"),
          ("Student", "I love playing soccer and reading books.", "Eu adoro jogar futebol e ler livros."),
          ("Friend", "That's cool! What kind of books do you read?", "Que legal! Que tipo de livros você lê?"),
          ("Student", "I enjoy fiction and adventure novels.", "Eu gosto de ficção e romances de aventura."),
        ],
        exercises: &[("Como você diz 'Quais são seus passatempos?'",
          &["What are your hobbies?", "What time is it?", "How are you?", "Where are you?"], 0)],
      }]),
    module(9, "Health & Wellness", "🏥", "Saúde, bem-estar e consultas médicas", B1, Practical,
      "from-emerald-400 to-emerald-600", &[LessonSpec {
        title: "At the Doctor",
        description: "Vocabulário médico e consultas",
        vocabulary: &[
          ("Doctor", "Médico", "ˈdäk-tər"),
          ("Pain", "Dor", "ˈpān"),
          ("Medicine", "Medicamento", "ˈme-də-sən"),
          ("Sick", "Doente", "ˈsik"),
        ],
        phrases: &[
          ("I don't feel well", "Não estou me sentindo bem", "ˈī ˌdōnt ˈfēl ˈwel"),
          ("I have a headache", "Tenho dor de cabeça", "ˈī ˈhav ə ˈhed-ˌāk"),
          ("Take this medicine", "Tome este medicamento", "ˈtāk ˈt͟his ˈme-də-sən"),
          ("Get some rest", "Descanse um pouco", "ˈɡet ˈsəm ˈrest"),
        ],
        dialogues: &[
          ("Doctor", "What seems to be the problem?", "Qual parece ser o problema?"),
          ("Patient", "I have a headache and I feel tired.", "Tenho dor de cabeça e me sinto cansado."),
          ("Doctor", "Let me examine you. Take this medicine and rest.", "Deixe-me examiná-lo. Tome este medicamento e descanse."),
          ("Patient", "Thank you, doctor!", "Obrigado, doutor!"),
        ],
        exercises: &[("Como você diz 'Tenho dor de cabeça'?",
          &["I have a headache", "I feel good", "I'm happy", "I'm tired"], 0)],
      }]),
    module(10, "Technology & Social Media", "📱", "Tecnologia, redes sociais e internet", B2, Daily,
      "from-indigo-400 to-indigo-600", &[LessonSpec {
        title: "Digital Communication",
        description: "Comunicação digital e redes sociais",
        vocabulary: &[
          ("App", "Aplicativo", "ˈap"),
          ("Social media", "Rede social", "ˈsō-shəl ˈmē-dē-ə"),
          ("Post", "Publicação", "ˈpōst"),
          ("Like", "Curtir", "ˈlīk"),
        ],
        phrases: &[
          ("Did you see my post?", "Você viu minha publicação?", "ˌdid ˈyo͞o ˈsē ˈmī ˈpōst"),
          ("I posted it on Instagram", "Postei no Instagram", "ˈī ˈpōs-təd ˈit ˌän ˈin-stə-ˌɡram"),
          ("Can you send me the link?", "Você pode me enviar o link?", "ˈkan ˈyo͞o ˈsend ˈmē t͟hə ˈliŋk"),
          ("I love this app!", "Eu adoro este app!", "ˈī ˈləv ˈt͟his ˈap"),
        ],
        dialogues: &[
          ("Friend", "Did you see my post on Facebook?", "Você viu minha publicação no Facebook?"),
          ("Student", "Yes! I liked it! It was amazing!", "Sim! Curti! Foi incrível!"),
          ("Friend", "Thanks! Can you share it?", "Obrigado! Você pode compartilhar?"),
          ("Student", "Of course! I'll share it right now.", "Claro! Vou compartilhar agora."),
        ],
        exercises: &[("Como você diz 'Você viu minha publicação?'",
          &["Did you see my post?", "What time is it?", "How are you?", "Where are you?"], 0)],
      }]),
    module(11, "Dating & Relationships", "💕", "Namoro, relacionamentos e expressões românticas", B2, Special,
      "from-rose-400 to-rose-600", &[LessonSpec {
        title: "Romantic Expressions",
        description: "Expressões românticas e conversas sobre relacionamentos",
        vocabulary: &[
          ("Love", "Amor", "ˈləv"),
          ("Beautiful", "Bonito/a", "ˈbyo͞o-tə-fəl"),
          ("Smile", "Sorriso", "ˈsmīl"),
          ("Heart", "Coração", "ˈhärt"),
        ],
        phrases: &[
          ("You are beautiful", "Você é bonito/a", "ˈyo͞o ˈär ˈbyo͞o-tə-fəl"),
          ("I love your smile", "Eu amo seu sorriso", "ˈī ˈləv ˈyȯr ˈsmīl"),
          ("You make me happy", "Você me faz feliz", "ˈyo͞o ˈmāk ˈmē ˈha-pē"),
          ("Will you be my girlfriend/boyfriend?", "Você quer ser minha namorada/meu namorado?", "ˈwil ˈyo͞o ˈbē ˈmī ˈɡərl-ˌfrend"),
        ],
        dialogues: &[
          ("José", "You are absolutely beautiful.", "Você é absolutamente bonita."),
          ("Teacher", "Thank you! You're very sweet.", "Obrigada! Você é muito doce."),
          ("José", "I love spending time with you.", "Eu adoro passar tempo com você."),
          ("Teacher", "I love it too! You make me so happy.", "Eu também adoro! Você me faz muito feliz."),
        ],
        exercises: &[("Como você diz 'Você é bonito/a'?",
          &["You are beautiful", "How are you?", "Nice to meet you", "Goodbye"], 0)],
      }]),
    module(12, "American Culture & Slang", "🇺🇸", "Cultura americana, gírias e expressões idiomáticas", B2, Social,
      "from-amber-400 to-amber-600", &[LessonSpec {
        title: "American Slang & Idioms",
        description: "Gírias e expressões idiomáticas americanas",
        vocabulary: &[
          ("Cool", "Legal", "ˈko͞ol"),
          ("Awesome", "Incrível", "ˈȯ-səm"),
          ("Dude", "Cara", "ˈdo͞od"),
          ("Chill", "Relaxar", "ˈt͟sil"),
        ],
        phrases: &[
          ("That's awesome!", "Isso é incrível!", "ˈðats ˈȯ-səm"),
          ("Chill out!", "Relaxa!", "ˈt͟sil ˈau̇t"),
          ("You're the best!", "Você é o melhor!", "ˈyȯr t͟hə ˈbest"),
          ("No way!", "Não acredito!", "ˈnō ˈwā"),
        ],
        dialogues: &[
          ("Friend", "Dude, that's so cool!", "Cara, isso é muito legal!"),
          ("Student", "Thanks! You're awesome!", "Obrigado! Você é incrível!"),
          ("Friend", "Let's chill and watch a movie.", "Vamos relaxar e assistir um filme."),
          ("Student", "Sounds good to me!", "Parece bom para mim!"),
        ],
        exercises: &[("Como você diz 'Isso é incrível!'?",
          &["That's awesome!", "That's terrible", "I don't know", "Goodbye"], 0)],
      }]),
  ]
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn catalog_lookup_and_level_filter() {
    let c = ModuleCatalog::builtin();
    assert_eq!(c.all().len(), 12);
    assert_eq!(c.get(11).map(|m| m.title), Some("Dating & Relationships"));
    assert!(c.get(13).is_none());
    let b1: Vec<u32> = c.by_level(CefrLevel::B1).iter().map(|m| m.id).collect();
    assert_eq!(b1, vec![6, 7, 8, 9]);
    assert!(c.by_level(CefrLevel::C2).is_empty());
  }

  #[test]
  fn lessons_carry_practice_content() {
    let c = ModuleCatalog::builtin();
    let greetings = c.get(1).and_then(|m| m.lesson(1)).unwrap();
    assert_eq!(greetings.title, "Basic Greetings");
    assert_eq!(greetings.vocabulary.len(), 6);
    assert_eq!(greetings.vocabulary[0].word, "Hello");
    assert_eq!(greetings.phrases[0].portuguese, "Como você está?");
    assert!(c.get(1).and_then(|m| m.lesson(2)).is_none());
  }

  #[test]
  fn every_exercise_answer_is_an_option() {
    for m in ModuleCatalog::builtin().all() {
      assert!(!m.lessons.is_empty(), "module {} has no lessons", m.id);
      for l in &m.lessons {
        assert_eq!(l.cefr_level, m.cefr_level);
        assert!(!l.vocabulary.is_empty() && !l.phrases.is_empty());
        for e in &l.exercises {
          assert!(e.correct < e.options.len(), "{}: {}", m.title, e.question);
        }
      }
    }
  }
}
