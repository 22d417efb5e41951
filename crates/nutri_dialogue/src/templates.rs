//! Hand-written reply pools.
//!
//! Slots: `{name}` speaker name, `{persona}` assistant display name,
//! `{period}` salutation for the hour, `{date}` long pt-BR date,
//! `{possessive}`/`{article}` persona gender words, `{ready}`/`{welcome}`
//! user gender words.

/// A template pool with variants for a known and an unknown speaker.
pub struct Pool {
    pub named: &'static [&'static str],
    pub anonymous: &'static [&'static str],
}

impl Pool {
    pub fn variants(&self, named: bool) -> &'static [&'static str] {
        if named || self.anonymous.is_empty() {
            self.named
        } else {
            self.anonymous
        }
    }
}

pub const INTRODUCTION: Pool = Pool {
    named: &[
        "Prazer, {name}! Que nome bonito! Então vamos ao que importa? O que você deseja saber sobre alimentação e nutrição?",
        "Oi {name}! Legal te conhecer! Bom, agora me conta: seu foco é emagrecer, ganhar massa ou ter mais energia no dia a dia?",
        "{name}! Adoro esse nome! Bom, vamos lá: qual é seu principal objetivo com nutrição agora?",
        "Olá {name}! Que bom ter você aqui! Me fala, o que te trouxe até mim? Quer ajuda com dieta, receitas ou dicas de saúde?",
    ],
    anonymous: &[],
};

pub const SAME_NAME: Pool = Pool {
    named: &[
        "Ah, meu xará! Também me chamo {name}! Que coincidência fantástica! Então {name}, vamos ao que importa? O que você quer saber sobre nutrição?",
        "Olha só! Somos xará, {name}! Adorei isso! Bom, agora que já nos conhecemos, me conta: qual é seu objetivo com alimentação?",
        "Sério?! Também sou {name}! Que massa! Bom {name}, vamos direto ao assunto: quer falar de emagrecimento, ganho de massa ou saúde geral?",
    ],
    anonymous: &[],
};

pub const RETRY: Pool = Pool {
    named: &[
        "Desculpa {persona}, não consegui pegar seu nome. Pode repetir pra mim?",
        "Ops, não entendi direito. Como você disse que se chama?",
        "Olha, acho que não captei bem. Qual é seu nome mesmo?",
    ],
    anonymous: &[],
};

pub const ACTIVATION: Pool = Pool {
    named: &[
        "Oi, eu sou {possessive} NutriAI, me chamo {persona}, e vamos focar na sua alimentação e nutrição. Aliás, como você se chama?",
        "E aí! Sou {article} NutriAI, pode me chamar de {persona}. Vou te ajudar com nutrição e bem-estar. Qual é seu nome?",
        "Olá! Me chamo {persona} e sou {possessive} nutricionista virtual. Vamos conversar sobre alimentação? Primeiro, como você se chama?",
    ],
    anonymous: &[
        "Oi, eu sou {possessive} NutriAI! Vamos focar na sua alimentação e nutrição. Primeiro, como você se chama?",
    ],
};

pub const WELCOME_BACK: Pool = Pool {
    named: &[
        "{welcome} de volta, {name}! {ready} para arrasar hoje?",
        "{welcome} de volta, {name}! {ready} para cuidar da alimentação hoje?",
    ],
    anonymous: &[],
};

pub const GREETING: Pool = Pool {
    named: &[
        "E aí, {name}! Como está seu dia?",
        "Oi, {name}! {ready} para evoluir hoje?",
        "Que bom te ver, {name}! No que posso ajudar?",
        "{period}, {name}! Como vai sua energia hoje?",
    ],
    anonymous: &[
        "Olá! Eu sou seu NutriAI. Qual é o seu nome?",
        "Oi! Sou seu assistente nutricional. Como você se chama?",
        "{period}! Vamos melhorar sua alimentação juntos?",
    ],
};

pub const DATE_INFO: Pool = Pool {
    named: &[
        "Hoje é {date}, {name}! Dia perfeito para comer bem!",
        "Hoje é {date}! Ótimo dia pra cuidar da alimentação, né? Me conta, {name}, como foi sua alimentação até agora?",
    ],
    anonymous: &["Hoje é {date}! Ótimo dia para focar na nutrição!"],
};

pub const WEIGHT_LOSS: Pool = Pool {
    named: &[
        "Entendi, {name}. A gente pode começar ajustando pequenas coisas, tipo trocar refrigerante por água saborizada ou incluir frutas no lanche. Quer que eu te ajude a montar um plano leve pra essa semana?",
        "Boa pergunta! Perder peso com saúde é totalmente possível, {name}. Vamos começar pelo básico: mais água, menos açúcar, e comida caseira. Posso te dar um cardápio simples pra testar?",
        "Poxa, {name}, emagrecer é sobre criar hábitos, não fazer sacrifício! Vamos começar leve: troca um lanche industrializado por fruta hoje. Quer tentar?",
        "Vamos lá, {name}! Para emagrecer: abuse de vegetais verdes e proteínas magras. Frango grelhado com brócolis?",
    ],
    anonymous: &[
        "Para emagrecer: foco em proteínas magras e vegetais! Salmão com aspargos é uma ótima opção!",
        "Emagrecimento saudável: salada de grão-de-bico com atum! Nutritivo e saciante!",
        "Dica para perder peso: vegetais verdes e proteínas magras! Frango com brócolis é perfeito!",
    ],
};

pub const MUSCLE_GAIN: Pool = Pool {
    named: &[
        "{name}, pra ganhar massa você precisa de proteínas magras, carboidratos bons e bastante água. Um exemplo seria frango grelhado com batata-doce e salada colorida. Quer que eu monte um cardápio rápido pra isso?",
        "Tô contigo nisso, {name}! Pra ganhar massa, come proteína de qualidade e não pula refeições. Bora montar um plano pra você?",
        "Excelente, {name}! Para ganhar massa: proteína máxima! Frango com batata doce e ovos!",
        "Hora da hipertrofia, {name}! Ovos, frango e leguminosas são combustível muscular!",
    ],
    anonymous: &[
        "Para ganhar massa: proteína é fundamental! Frango com batata doce e ovos!",
        "Hipertrofia precisa de proteína! Peito de frango com quinoa e vegetais!",
        "Massa muscular: foco em proteínas! Ovos no café, frango no almoço, peixe no jantar!",
    ],
};

pub const ENERGY: Pool = Pool {
    named: &[
        "Poxa, entendo... tem dias assim mesmo, {name}. Que tal a gente tentar ajustar sua alimentação pra te dar mais energia? Às vezes, um bom café da manhã muda tudo!",
        "{name}, tô contigo nisso. Alimentação afeta muito nosso humor, viu? Vamos ajustar pra você ter mais disposição?",
        "Energia, {name}? Aveia com banana é combustível perfeito!",
    ],
    anonymous: &[
        "Para energia: aveia com banana! Combustível premium!",
        "Sei como é. Cansaço pode ser falta de nutrientes, sabia? Vamos revisar o que você tá comendo?",
        "Energia duradoura: batata doce com proteína! Combustível de qualidade!",
    ],
};

pub const MEAL: Pool = Pool {
    named: &[
        "Olha só, {name}, tenho várias receitas fit e gostosas! Quer algo rápido pro dia a dia ou uma receita especial pra fim de semana?",
        "Claro, {name}! Que tal um refogado de legumes com frango? Rápido e nutritivo!",
        "{name}, sugestão: peixe assado com legumes! Fácil e super saudável!",
        "Pensei em você, {name}! Wrap de folhas com homus e vegetais! Delicioso!",
    ],
    anonymous: &[
        "Boa! Vamos de receitas então. Me conta, você curte comida mais leve ou algo mais substancial?",
        "Receitas é comigo mesmo! Que tal a gente montar algo com ingredientes que você já tem em casa?",
        "Que tal peixe assado com legumes? Saudável e saboroso!",
    ],
};

pub const THANKS: Pool = Pool {
    named: &[
        "De nada, {name}! Tamo junto nessa jornada nutricional!",
        "Por nada, {name}! Estou aqui sempre que precisar!",
        "Imagina, {name}! Qualquer dúvida, estou aqui!",
    ],
    anonymous: &[
        "Imagina! Qualquer coisa, só chamar. Estou aqui pra te ajudar sempre!",
        "Por nada! Adorei nossa conversa, viu? Sempre que precisar, é só falar!",
        "De nada! Fico feliz em poder ajudar!",
    ],
};

pub const GENERAL: Pool = Pool {
    named: &[
        "Interessante, {name}! Sobre nutrição, posso te ajudar com receitas, cálculos ou dicas personalizadas. O que te interessa mais?",
        "Legal isso! Me conta mais, {name}. Como posso ajudar com alimentação hoje?",
        "Olha só, {name}, adorei sua curiosidade! Quer falar sobre dieta, receitas ou dicas gerais de saúde?",
        "Boa pergunta! Vamos explorar isso juntos, {name}. Me dá mais detalhes do que você tá pensando?",
    ],
    anonymous: &[
        "Interessante! Como posso ajudar sua nutrição hoje?",
        "Hmm, entendi! Vamos focar na sua alimentação?",
        "Conte mais! Estou aqui para ajudar com sua dieta e saúde!",
    ],
};
