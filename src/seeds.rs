//! Built-in content: the 30-item placement test, progressing A1 -> C2.
//!
//! Question text is English; explanations are product copy for Brazilian
//! Portuguese speakers.

use crate::domain::{CefrLevel, Question, QuestionType};

fn choice(id: &str, prompt: &str, options: &[&str], answer: &str, explanation: &str, level: CefrLevel) -> Question {
  Question {
    id: id.into(),
    prompt: prompt.into(),
    kind: QuestionType::MultipleChoice,
    options: Some(options.iter().map(|o| o.to_string()).collect()),
    correct_answer: answer.into(),
    explanation: explanation.into(),
    cefr_level: level,
  }
}

fn open(id: &str, kind: QuestionType, prompt: &str, answer: &str, explanation: &str, level: CefrLevel) -> Question {
  Question {
    id: id.into(),
    prompt: prompt.into(),
    kind,
    options: None,
    correct_answer: answer.into(),
    explanation: explanation.into(),
    cefr_level: level,
  }
}

/// The fixed placement bank, five items per band, in presentation order.
pub fn seed_questions() -> Vec<Question> {
  use CefrLevel::*;
  use QuestionType::{FillBlank, Translation};

  vec![
    // A1
    choice("q1", "What is your name?",
      &["My name is José", "I am José", "I'm José", "All of the above"],
      "All of the above",
      "Todas as opções são formas corretas de apresentar seu nome em inglês.", A1),
    open("q2", FillBlank, "Complete: 'She ___ a teacher.'", "is",
      "Usamos 'is' com pronomes singulares como 'she'. Exemplo: She is a teacher.", A1),
    open("q3", Translation, "Translate to English: 'Olá, tudo bem?'", "Hello, how are you?",
      "Uma forma comum de cumprimento em inglês. Outras opções: 'Hi, how are you?' ou 'Hey, how's it going?'", A1),
    choice("q4", "What time is it?",
      &["It is 3 o'clock", "It's 3 o'clock", "The time is 3 o'clock", "All of the above"],
      "All of the above",
      "Todas as formas são corretas para dizer as horas em inglês.", A1),
    open("q5", FillBlank, "Complete: 'I ___ from Brazil.'", "am",
      "Usamos 'am' com 'I'. Exemplo: I am from Brazil.", A1),

    // A2
    choice("q6", "What did you do yesterday?",
      &["I went to the beach", "I was at home", "I studied English", "All of the above"],
      "All of the above",
      "Todas são respostas válidas usando o passado simples.", A2),
    open("q7", FillBlank, "Complete: 'If I ___ you, I would help.'", "were",
      "Usamos 'were' em estruturas condicionais com 'I'. Exemplo: If I were you, I would help.", A2),
    open("q8", Translation, "Translate: 'Eu gostaria de um café, por favor.'", "I would like a coffee, please.",
      "Forma polida de pedir algo em inglês. Alternativa: 'I'd like a coffee, please.'", A2),
    choice("q9", "Which sentence is correct?",
      &[
        "She has been living here for 5 years",
        "She lives here for 5 years",
        "She is living here for 5 years",
        "She lived here for 5 years",
      ],
      "She has been living here for 5 years",
      "Para ações que começaram no passado e continuam, usamos 'present perfect continuous'.", A2),
    open("q10", FillBlank, "Complete: 'I haven't seen him ___ last week.'", "since",
      "'Since' é usado com um ponto no tempo. Exemplo: I haven't seen him since last week.", A2),

    // B1
    choice("q11", "What does 'to break the ice' mean?",
      &["Quebrar gelo literal", "Iniciar uma conversa para reduzir tensão", "Congelar algo", "Nenhuma das acima"],
      "Iniciar uma conversa para reduzir tensão",
      "'Break the ice' é um phrasal verb que significa iniciar uma conversa para reduzir constrangimento.", B1),
    open("q12", FillBlank, "Complete: 'Despite ___ hard, he didn't pass the exam.'", "studying",
      "Após 'despite', usamos um gerúndio ou nome. Exemplo: Despite studying hard, he didn't pass.", B1),
    open("q13", Translation, "Translate: 'Embora ele seja rico, ele é muito humilde.'", "Although he is rich, he is very humble.",
      "'Although' conecta duas ideias contrastantes. Alternativa: 'Even though he is rich, he is very humble.'", B1),
    choice("q14", "Which is the best response to 'How do you feel about the proposal?'",
      &[
        "I think it's a good idea, but I have some concerns.",
        "Yes, it's good.",
        "No, it's bad.",
        "I don't know.",
      ],
      "I think it's a good idea, but I have some concerns.",
      "Uma resposta mais elaborada e natural que mostra nuances de opinião.", B1),
    open("q15", FillBlank, "Complete: 'If I had known about the party, I ___ come.'", "would have",
      "Condicional do passado. Exemplo: If I had known, I would have come.", B1),

    // B2
    choice("q16", "What is the meaning of 'to put someone on a pedestal'?",
      &["Colocar alguém em um pedestal literal", "Admirar alguém excessivamente", "Ignorar alguém", "Criticar alguém"],
      "Admirar alguém excessivamente",
      "'Put on a pedestal' significa admirar ou idealizar alguém demais.", B2),
    open("q17", FillBlank, "Complete: 'The report ___ the need for immediate action.'", "underscores",
      "'Underscores' significa destacar ou enfatizar. Alternativa: 'emphasizes' ou 'highlights'.", B2),
    open("q18", Translation, "Translate: 'A despeito de suas limitações, ele alcançou grande sucesso.'",
      "Despite his limitations, he achieved great success.",
      "'Despite' é uma preposição que introduz uma ideia contrastante.", B2),
    choice("q19", "Which sentence uses the subjunctive mood correctly?",
      &[
        "I suggest that he goes to the doctor.",
        "I suggest that he go to the doctor.",
        "I suggest him to go to the doctor.",
        "I suggest him going to the doctor.",
      ],
      "I suggest that he go to the doctor.",
      "O subjuntivo em inglês usa a forma base do verbo após 'suggest', 'recommend', etc.", B2),
    open("q20", FillBlank, "Complete: 'The phenomenon ___ to several factors.'", "can be attributed",
      "'Can be attributed to' significa 'pode ser atribuído a'. Exemplo: The phenomenon can be attributed to several factors.", B2),

    // C1
    choice("q21", "What does 'to prevaricate' mean?",
      &["Preparar algo", "Evitar dizer a verdade", "Procrastinar", "Prevenir algo"],
      "Evitar dizer a verdade",
      "'Prevaricate' significa evadir-se ou evitar dizer a verdade diretamente.", C1),
    open("q22", FillBlank, "Complete: 'His ___ for detail was both a strength and a weakness.'", "penchant",
      "'Penchant' significa inclinação ou tendência. Exemplo: His penchant for detail was remarkable.", C1),
    open("q23", Translation, "Translate: 'A sua perspicácia nos negócios permitiu-lhe acumular uma fortuna considerável.'",
      "His business acumen allowed him to accumulate considerable wealth.",
      "'Acumen' significa perspicácia ou habilidade em algo. 'Considerable' significa significativo.", C1),
    choice("q24", "Which sentence demonstrates sophisticated use of English?",
      &[
        "The problem is very big and hard to solve.",
        "The intricacies of the problem render it particularly challenging to resolve.",
        "The problem is difficult.",
        "It's hard to fix the problem.",
      ],
      "The intricacies of the problem render it particularly challenging to resolve.",
      "Esta frase usa vocabulário sofisticado e estrutura gramatical complexa.", C1),
    open("q25", FillBlank, "Complete: 'The author's ___ style makes the novel both accessible and intellectually stimulating.'",
      "felicitous",
      "'Felicitous' significa apropriado, bem-escolhido ou que funciona bem. Exemplo: His felicitous choice of words impressed everyone.", C1),

    // C2
    choice("q26", "What is the precise meaning of 'to obfuscate'?",
      &["Tornar claro e compreensível", "Tornar obscuro ou confuso intencionalmente", "Simplificar algo", "Criticar algo"],
      "Tornar obscuro ou confuso intencionalmente",
      "'Obfuscate' significa deliberadamente tornar algo obscuro ou difícil de entender.", C2),
    open("q27", FillBlank, "Complete: 'The government's ___ policies were widely criticized by economists.'", "profligate",
      "'Profligate' significa extravagante ou desperdiçador. Exemplo: His profligate spending led to bankruptcy.", C2),
    open("q28", Translation, "Translate: 'A sua erudição e eloquência tornaram-no um orador formidável.'",
      "His erudition and eloquence made him a formidable orator.",
      "'Erudition' = conhecimento profundo; 'eloquence' = capacidade de falar bem; 'formidable' = impressionante.", C2),
    choice("q29", "Which demonstrates the most nuanced understanding of English?",
      &[
        "The situation is complicated.",
        "The situation's multifaceted nature engenders considerable ambiguity.",
        "The situation is hard to understand.",
        "There are many problems.",
      ],
      "The situation's multifaceted nature engenders considerable ambiguity.",
      "Uso sofisticado de 'multifaceted', 'engenders' e 'ambiguity' demonstra domínio avançado.", C2),
    open("q30", FillBlank, "Complete: 'His ___ observations about human nature revealed a profound understanding of psychology.'",
      "perspicacious",
      "'Perspicacious' significa que tem visão aguçada ou perspicácia. Exemplo: Her perspicacious analysis was invaluable.", C2),
  ]
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn bank_has_five_items_per_band() {
    let qs = seed_questions();
    assert_eq!(qs.len(), 30);
    for level in CefrLevel::ALL {
      assert_eq!(qs.iter().filter(|q| q.cefr_level == level).count(), 5, "band {level}");
    }
  }
}
